//! Validation for the Kubernetes orchestrator configuration block.
//!
//! Covers subnet and duration syntax on the tunables the tool forwards to
//! the kubelet and controller-manager, the pod-limit floor, and the
//! cross-field timing rule between node status updates and the
//! controller-manager grace period.

use std::net::Ipv4Addr;

use tracing::warn;

use crate::api::KubernetesConfig;
use crate::versions;

use super::error::{Error, Result};
use super::fields::{validate_cidr, validate_duration};

/// Smallest allowed value for `maxPods`.
pub const MIN_MAX_PODS: i32 = 5;

/// `--node-monitor-grace-period` must give the kubelet at least this many
/// node-status update attempts before a node is marked unhealthy.
pub const MIN_KUBELET_RETRIES: u32 = 4;

/// First Kubernetes version that ships the external cloud controller
/// manager.
pub const CLOUD_CONTROLLER_MANAGER_MIN_VERSION: &str = "1.8.0";

/// Validate one Kubernetes configuration block against the resolved
/// orchestrator version.
pub fn validate_kubernetes_config(config: &KubernetesConfig, version: &str) -> Result<()> {
    if !config.cluster_subnet.is_empty() {
        validate_cidr("clusterSubnet", &config.cluster_subnet)?;
    }
    if !config.docker_bridge_subnet.is_empty() {
        validate_cidr("dockerBridgeSubnet", &config.docker_bridge_subnet)?;
    }
    if config.max_pods != 0 && config.max_pods < MIN_MAX_PODS {
        return Err(Error::Range(format!(
            "maxPods {} is less than the minimum of {}",
            config.max_pods, MIN_MAX_PODS
        )));
    }

    if let Some(cidr) = config.kubelet_config.get("--non-masquerade-cidr") {
        validate_cidr("--non-masquerade-cidr", cidr)?;
    }

    let update_frequency = config.kubelet_config.get("--node-status-update-frequency");
    let update_frequency_duration = match update_frequency {
        Some(value) => Some(validate_duration("--node-status-update-frequency", value)?),
        None => None,
    };

    if let Some(value) = config
        .controller_manager_config
        .get("--node-monitor-grace-period")
    {
        let grace_period = validate_duration("--node-monitor-grace-period", value)?;
        if let (Some(frequency), Some(frequency_value)) =
            (update_frequency_duration, update_frequency)
        {
            if grace_period < frequency * MIN_KUBELET_RETRIES {
                return Err(Error::Range(format!(
                    "--node-monitor-grace-period '{value}' must exceed \
                     --node-status-update-frequency '{frequency_value}' by at least a factor \
                     of {MIN_KUBELET_RETRIES}"
                )));
            }
        }
    }

    if let Some(value) = config
        .controller_manager_config
        .get("--pod-eviction-timeout")
    {
        validate_duration("--pod-eviction-timeout", value)?;
    }
    if let Some(value) = config
        .controller_manager_config
        .get("--route-reconciliation-period")
    {
        validate_duration("--route-reconciliation-period", value)?;
    }

    validate_dns_service_ip(config)?;

    if config.use_cloud_controller_manager == Some(true)
        && !versions::version_at_least(version, CLOUD_CONTROLLER_MANAGER_MIN_VERSION)
    {
        warn!(
            version,
            min_version = CLOUD_CONTROLLER_MANAGER_MIN_VERSION,
            "useCloudControllerManager has no effect before the minimum version"
        );
    }

    Ok(())
}

/// `dnsServiceIP` and `serviceCidr` come as a pair: the address must be a
/// usable unicast address inside the subnet, excluding the subnet's first
/// address and its broadcast address.
fn validate_dns_service_ip(config: &KubernetesConfig) -> Result<()> {
    match (
        config.dns_service_ip.is_empty(),
        config.service_cidr.is_empty(),
    ) {
        (true, true) => return Ok(()),
        (false, true) => {
            return Err(Error::MutualExclusion(
                "serviceCidr must be specified when dnsServiceIP is set".to_string(),
            ))
        }
        (true, false) => {
            return Err(Error::MutualExclusion(
                "dnsServiceIP must be specified when serviceCidr is set".to_string(),
            ))
        }
        (false, false) => {}
    }

    let service_cidr = validate_cidr("serviceCidr", &config.service_cidr)?;
    let dns_ip: Ipv4Addr = config.dns_service_ip.parse().map_err(|_| {
        Error::Format(format!(
            "dnsServiceIP '{}' is an invalid IP address",
            config.dns_service_ip
        ))
    })?;

    if !service_cidr.contains(dns_ip) {
        return Err(Error::Range(format!(
            "dnsServiceIP '{}' is not within the serviceCidr '{}'",
            config.dns_service_ip, config.service_cidr
        )));
    }
    if dns_ip == service_cidr.address {
        return Err(Error::Range(format!(
            "dnsServiceIP '{}' cannot be the first IP of serviceCidr '{}'",
            config.dns_service_ip, config.service_cidr
        )));
    }
    if dns_ip == service_cidr.broadcast() {
        return Err(Error::Range(format!(
            "dnsServiceIP '{}' cannot be the broadcast address of serviceCidr '{}'",
            config.dns_service_ip, config.service_cidr
        )));
    }
    Ok(())
}
