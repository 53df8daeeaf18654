//! Orchestrator selection validation: configuration-block matching and the
//! version gate.
//!
//! New clusters must request a version currently offered for the chosen
//! orchestrator. Existing clusters being revalidated for an upgrade may run
//! patch releases that are no longer offered, so update mode accepts any
//! version the orchestrator has ever shipped. The asymmetry is deliberate.

use crate::api::{OrchestratorProfile, OrchestratorType};
use crate::versions;

use super::error::{Error, Result};
use super::kubernetes::validate_kubernetes_config;

/// Validate the orchestrator profile and return the resolved target
/// version (empty for orchestrators without a version catalog).
///
/// `has_windows_agents` narrows the acceptable versions to the
/// Windows-eligible subset; `is_update` selects the relaxed gate for
/// clusters that already exist.
pub fn validate_orchestrator_profile(
    profile: &OrchestratorProfile,
    has_windows_agents: bool,
    is_update: bool,
) -> Result<String> {
    validate_config_block_kinds(profile)?;
    let target_version = resolve_target_version(profile, has_windows_agents, is_update)?;

    if profile.orchestrator_type == OrchestratorType::Kubernetes {
        if let Some(config) = &profile.kubernetes_config {
            validate_kubernetes_config(config, &target_version)?;
        }
    }
    Ok(target_version)
}

/// Only the configuration block matching the declared orchestrator type
/// may carry non-default values. An empty block of the wrong kind is
/// tolerated.
fn validate_config_block_kinds(profile: &OrchestratorProfile) -> Result<()> {
    if profile.orchestrator_type != OrchestratorType::Kubernetes {
        if let Some(config) = &profile.kubernetes_config {
            if config.is_populated() {
                return Err(wrong_block_error("kubernetesConfig", OrchestratorType::Kubernetes));
            }
        }
    }
    if profile.orchestrator_type != OrchestratorType::Dcos {
        if let Some(config) = &profile.dcos_config {
            if config.is_populated() {
                return Err(wrong_block_error("dcosConfig", OrchestratorType::Dcos));
            }
        }
    }
    if profile.orchestrator_type != OrchestratorType::OpenShift {
        if let Some(config) = &profile.openshift_config {
            if config.is_populated() {
                return Err(wrong_block_error("openshiftConfig", OrchestratorType::OpenShift));
            }
        }
    }
    Ok(())
}

fn wrong_block_error(block: &str, expected: OrchestratorType) -> Error {
    Error::Structural(format!(
        "{block} can only be specified when orchestratorType is {expected}"
    ))
}

fn resolve_target_version(
    profile: &OrchestratorProfile,
    has_windows_agents: bool,
    is_update: bool,
) -> Result<String> {
    let orchestrator = profile.orchestrator_type;
    let version = versions::normalize(&profile.orchestrator_version);
    let release = versions::normalize(&profile.orchestrator_release);

    if !version.is_empty() && !release.is_empty() {
        return Err(Error::MutualExclusion(
            "orchestratorVersion and orchestratorRelease are mutually exclusive, specify at most \
             one"
            .to_string(),
        ));
    }

    // Swarm flavors carry no version catalog and are never gated.
    if matches!(
        orchestrator,
        OrchestratorType::Swarm | OrchestratorType::SwarmMode
    ) {
        return Ok(version.to_string());
    }

    if is_update {
        return match orchestrator {
            OrchestratorType::Kubernetes | OrchestratorType::Dcos => {
                if !release.is_empty() {
                    return versions::resolve_release_any(orchestrator, release)
                        .map(str::to_string)
                        .ok_or_else(|| unsupported_version_error(profile));
                }
                if version.is_empty() {
                    return Ok(versions::default_version(orchestrator).to_string());
                }
                if versions::is_known_version(orchestrator, version) {
                    Ok(version.to_string())
                } else {
                    Err(unsupported_version_error(profile))
                }
            }
            // Other orchestrators are not re-gated once the cluster exists.
            _ => Ok(version.to_string()),
        };
    }

    if !release.is_empty() {
        return versions::resolve_release(orchestrator, release, has_windows_agents)
            .map(str::to_string)
            .ok_or_else(|| unsupported_version_error(profile));
    }
    if version.is_empty() {
        return Ok(versions::default_version(orchestrator).to_string());
    }
    if versions::is_supported_version(orchestrator, version, has_windows_agents) {
        Ok(version.to_string())
    } else {
        Err(unsupported_version_error(profile))
    }
}

fn unsupported_version_error(profile: &OrchestratorProfile) -> Error {
    Error::UnsupportedVersion(format!(
        "the requested orchestrator configuration is not supported: orchestratorType '{}', \
         orchestratorRelease '{}', orchestratorVersion '{}'; check the supported versions for \
         this build",
        profile.orchestrator_type, profile.orchestrator_release, profile.orchestrator_version,
    ))
}
