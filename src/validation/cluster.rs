//! Top-level cluster validation.
//!
//! Composes the orchestrator, pool, host-profile, network, and identity
//! rules into a single pass over the full cluster description. Rules run in
//! a fixed order and the first failure is returned; nothing is aggregated.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::api::{
    ClusterSpec, ImageRef, OrchestratorType, AVAILABILITY_PROFILE_VALUES, MANAGED_DISKS,
    STORAGE_PROFILE_VALUES,
};

use super::error::{Error, Result};
use super::fields::{validate_dns_prefix, validate_label_key, validate_label_value};
use super::identity::{validate_aad_profile, validate_service_principal};
use super::network::{
    validate_container_runtime, validate_network_plugin, validate_network_plugin_plus_policy,
    validate_network_policy,
};
use super::orchestrator::validate_orchestrator_profile;

/// Allowed control-plane node counts.
pub const MASTER_COUNT_VALUES: [i32; 3] = [1, 3, 5];

/// Smallest allowed agent pool size.
pub const MIN_AGENT_COUNT: i32 = 1;

/// Largest allowed agent pool size.
pub const MAX_AGENT_COUNT: i32 = 100;

// Pool names end up in VM host names, hence short and lowercase.
static POOL_NAME_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9]{0,11}$").ok());

/// Validate a full cluster description.
///
/// `is_update` relaxes the version gate for clusters that already exist.
/// Validation is all-or-nothing: the spec is never partially accepted, and
/// the first failing rule is the one reported.
pub fn validate_cluster(spec: &ClusterSpec, is_update: bool) -> Result<()> {
    debug!(
        orchestrator = %spec.orchestrator_profile.orchestrator_type,
        is_update,
        "validating cluster description"
    );

    validate_orchestrator_profile(
        &spec.orchestrator_profile,
        spec.has_windows_agents(),
        is_update,
    )?;
    validate_master_profile(spec)?;
    validate_agent_pools(spec)?;
    validate_host_profiles(spec)?;

    match spec.orchestrator_profile.orchestrator_type {
        OrchestratorType::Kubernetes => validate_kubernetes_cluster(spec)?,
        OrchestratorType::OpenShift => validate_openshift_cluster(spec)?,
        _ => {}
    }
    Ok(())
}

fn validate_master_profile(spec: &ClusterSpec) -> Result<()> {
    let Some(master) = &spec.master_profile else {
        return Err(Error::MissingField("masterProfile must be specified".to_string()));
    };

    if !MASTER_COUNT_VALUES.contains(&master.count) {
        return Err(Error::Range(format!(
            "masterProfile count must be 1, 3, or 5, not {}",
            master.count
        )));
    }
    validate_dns_prefix(&master.dns_prefix)?;
    if master.vm_size.is_empty() {
        return Err(Error::MissingField(
            "masterProfile vmSize must be specified".to_string(),
        ));
    }
    if !STORAGE_PROFILE_VALUES.contains(&master.storage_profile.as_str()) {
        return Err(Error::Compatibility(format!(
            "unknown masterProfile storageProfile '{}' specified, must be one of: {}",
            master.storage_profile,
            STORAGE_PROFILE_VALUES.join(", ")
        )));
    }
    if let Some(image_ref) = &master.image_ref {
        validate_image_ref(image_ref)?;
    }
    Ok(())
}

fn validate_agent_pools(spec: &ClusterSpec) -> Result<()> {
    let mut names = BTreeSet::new();
    for pool in &spec.agent_pool_profiles {
        if !POOL_NAME_RE
            .as_ref()
            .is_some_and(|re| re.is_match(&pool.name))
        {
            return Err(Error::Format(format!(
                "agent pool name '{}' is invalid. Pool names must start with a lowercase letter, \
                 contain only lowercase letters and numbers, and be 12 characters or less",
                pool.name
            )));
        }
        if !names.insert(pool.name.as_str()) {
            return Err(Error::Structural(format!(
                "agent pool name '{}' already exists, pool names must be unique across pools",
                pool.name
            )));
        }
        if !(MIN_AGENT_COUNT..=MAX_AGENT_COUNT).contains(&pool.count) {
            return Err(Error::Range(format!(
                "agent pool '{}' count must be between {} and {}, not {}",
                pool.name, MIN_AGENT_COUNT, MAX_AGENT_COUNT, pool.count
            )));
        }
        if pool.vm_size.is_empty() {
            return Err(Error::MissingField(format!(
                "agent pool '{}' vmSize must be specified",
                pool.name
            )));
        }
        if !AVAILABILITY_PROFILE_VALUES.contains(&pool.availability_profile.as_str()) {
            return Err(Error::Compatibility(format!(
                "unknown availabilityProfile '{}' specified for agent pool '{}', must be one of: {}",
                pool.availability_profile,
                pool.name,
                AVAILABILITY_PROFILE_VALUES.join(", ")
            )));
        }
        if !STORAGE_PROFILE_VALUES.contains(&pool.storage_profile.as_str()) {
            return Err(Error::Compatibility(format!(
                "unknown storageProfile '{}' specified for agent pool '{}', must be one of: {}",
                pool.storage_profile,
                pool.name,
                STORAGE_PROFILE_VALUES.join(", ")
            )));
        }
        if spec.orchestrator_profile.orchestrator_type == OrchestratorType::Kubernetes {
            for (key, value) in &pool.custom_node_labels {
                validate_label_key(key)?;
                validate_label_value(value)?;
            }
        }
        if let Some(image_ref) = &pool.image_ref {
            validate_image_ref(image_ref)?;
        }
    }
    Ok(())
}

/// A custom image is referenced by name and resource group together. The
/// message text is part of the CLI contract.
fn validate_image_ref(image: &ImageRef) -> Result<()> {
    match (image.name.is_empty(), image.resource_group.is_empty()) {
        (true, false) => Err(Error::MutualExclusion(
            "imageName needs to be specified when imageResourceGroup is provided".to_string(),
        )),
        (false, true) => Err(Error::MutualExclusion(
            "imageResourceGroup needs to be specified when imageName is provided".to_string(),
        )),
        _ => Ok(()),
    }
}

fn validate_host_profiles(spec: &ClusterSpec) -> Result<()> {
    match spec.orchestrator_profile.orchestrator_type {
        OrchestratorType::Kubernetes | OrchestratorType::OpenShift => {
            let Some(linux) = &spec.linux_profile else {
                return Err(Error::MissingField("linuxProfile must be specified".to_string()));
            };
            if linux.admin_username.is_empty() {
                return Err(Error::MissingField(
                    "linuxProfile adminUsername must be specified".to_string(),
                ));
            }
            match linux.ssh.public_keys.as_slice() {
                [key] => {
                    if key.key_data.is_empty() {
                        return Err(Error::MissingField(
                            "linuxProfile SSH public key data must be specified".to_string(),
                        ));
                    }
                }
                _ => {
                    return Err(Error::Structural(
                        "linuxProfile must include exactly one SSH public key".to_string(),
                    ))
                }
            }
        }
        _ => {}
    }

    if spec.has_windows_agents() {
        let Some(windows) = &spec.windows_profile else {
            return Err(Error::MissingField(
                "windowsProfile must be specified when Windows agent pools are used".to_string(),
            ));
        };
        if windows.admin_username.is_empty() {
            return Err(Error::MissingField(
                "windowsProfile adminUsername must be specified".to_string(),
            ));
        }
        if windows.admin_password.is_empty() {
            return Err(Error::MissingField(
                "windowsProfile adminPassword must be specified".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_kubernetes_cluster(spec: &ClusterSpec) -> Result<()> {
    validate_network_policy(spec)?;
    validate_network_plugin(spec)?;
    validate_network_plugin_plus_policy(spec)?;
    validate_container_runtime(spec)?;

    let Some(service_principal) = &spec.service_principal_profile else {
        return Err(Error::MissingField(format!(
            "servicePrincipalProfile must be specified with orchestrator {}",
            OrchestratorType::Kubernetes
        )));
    };
    validate_service_principal(service_principal)?;

    if let Some(aad) = &spec.aad_profile {
        validate_aad_profile(aad)?;
    }
    Ok(())
}

fn validate_openshift_cluster(spec: &ClusterSpec) -> Result<()> {
    let Some(config) = &spec.orchestrator_profile.openshift_config else {
        return Err(Error::MissingField(
            "openshiftConfig must be specified for the OpenShift orchestrator".to_string(),
        ));
    };
    if config.cluster_username.is_empty() || config.cluster_password.is_empty() {
        return Err(Error::MissingField(
            "openshiftConfig clusterUsername and clusterPassword must be specified".to_string(),
        ));
    }

    let Some(az) = &spec.az_profile else {
        return Err(Error::MissingField(
            "azProfile must be specified for the OpenShift orchestrator".to_string(),
        ));
    };
    if az.location.is_empty()
        || az.resource_group.is_empty()
        || az.subscription_id.is_empty()
        || az.tenant_id.is_empty()
    {
        return Err(Error::MissingField(
            "azProfile location, resourceGroup, subscriptionId, and tenantId must all be \
             specified"
                .to_string(),
        ));
    }

    // One storage kind across the control plane and every agent pool. The
    // message text is part of the CLI contract.
    if let Some(master) = &spec.master_profile {
        if master.storage_profile != MANAGED_DISKS {
            return Err(openshift_storage_error());
        }
    }
    for pool in &spec.agent_pool_profiles {
        if pool.storage_profile != MANAGED_DISKS {
            return Err(openshift_storage_error());
        }
    }
    Ok(())
}

fn openshift_storage_error() -> Error {
    Error::Compatibility("OpenShift orchestrator supports only ManagedDisks".to_string())
}
