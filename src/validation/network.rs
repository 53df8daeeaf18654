//! Network plugin, network policy, and container runtime compatibility.
//!
//! Individually valid values are not freely composable: the deployable
//! plugin/policy pairs are a fixed allow-list, and some choices have no
//! implementation on Windows pools. These rules read the whole cluster
//! description because the OS restriction depends on the agent pools.

use crate::api::ClusterSpec;

use super::error::{Error, Result};

/// Accepted `networkPlugin` values. Empty means "tool default".
pub const NETWORK_PLUGIN_VALUES: [&str; 4] = ["", "azure", "kubenet", "flannel"];

/// Accepted `networkPolicy` values. Empty means "no policy".
pub const NETWORK_POLICY_VALUES: [&str; 5] = ["", "none", "azure", "calico", "cilium"];

/// Network policies with no Windows data plane.
const LINUX_ONLY_NETWORK_POLICIES: [&str; 2] = ["calico", "cilium"];

/// Accepted `containerRuntime` values. Empty means "tool default".
pub const CONTAINER_RUNTIME_VALUES: [&str; 4] = ["", "docker", "clear-containers", "containerd"];

/// Container runtimes with no Windows support.
const LINUX_ONLY_CONTAINER_RUNTIMES: [&str; 1] = ["clear-containers"];

/// Plugin/policy combinations that actually deploy together. Pairs outside
/// this list are rejected even when both values are individually valid;
/// the list is authoritative, not derivable.
const NETWORK_PLUGIN_PLUS_POLICY_ALLOWED: [(&str, &str); 9] = [
    ("", ""),
    ("azure", ""),
    ("kubenet", ""),
    ("flannel", ""),
    ("", "none"),
    ("", "azure"),
    ("", "calico"),
    ("", "cilium"),
    ("kubenet", "calico"),
];

/// Validate the network policy value and its OS restrictions.
pub fn validate_network_policy(spec: &ClusterSpec) -> Result<()> {
    let Some(config) = spec.orchestrator_profile.kubernetes_config.as_ref() else {
        return Ok(());
    };
    let policy = config.network_policy.as_str();

    if !NETWORK_POLICY_VALUES.contains(&policy) {
        return Err(Error::Compatibility(format!(
            "unknown networkPolicy '{}' specified, must be one of: {}",
            policy,
            NETWORK_POLICY_VALUES.join(", ")
        )));
    }
    if LINUX_ONLY_NETWORK_POLICIES.contains(&policy) && spec.has_windows_agents() {
        return Err(Error::Compatibility(format!(
            "networkPolicy '{policy}' is not supported on clusters with Windows agent pools"
        )));
    }
    Ok(())
}

/// Validate the network plugin value.
pub fn validate_network_plugin(spec: &ClusterSpec) -> Result<()> {
    let Some(config) = spec.orchestrator_profile.kubernetes_config.as_ref() else {
        return Ok(());
    };
    let plugin = config.network_plugin.as_str();

    if !NETWORK_PLUGIN_VALUES.contains(&plugin) {
        return Err(Error::Compatibility(format!(
            "unknown networkPlugin '{}' specified, must be one of: {}",
            plugin,
            NETWORK_PLUGIN_VALUES.join(", ")
        )));
    }
    Ok(())
}

/// Validate the plugin/policy pair against the allow-list.
pub fn validate_network_plugin_plus_policy(spec: &ClusterSpec) -> Result<()> {
    let Some(config) = spec.orchestrator_profile.kubernetes_config.as_ref() else {
        return Ok(());
    };
    let pair = (
        config.network_plugin.as_str(),
        config.network_policy.as_str(),
    );

    if !NETWORK_PLUGIN_PLUS_POLICY_ALLOWED.contains(&pair) {
        return Err(Error::Compatibility(format!(
            "networkPlugin '{}' cannot be combined with networkPolicy '{}'",
            pair.0, pair.1
        )));
    }
    Ok(())
}

/// Validate the container runtime value and its OS restrictions.
pub fn validate_container_runtime(spec: &ClusterSpec) -> Result<()> {
    let Some(config) = spec.orchestrator_profile.kubernetes_config.as_ref() else {
        return Ok(());
    };
    let runtime = config.container_runtime.as_str();

    if !CONTAINER_RUNTIME_VALUES.contains(&runtime) {
        return Err(Error::Compatibility(format!(
            "unknown containerRuntime '{}' specified, must be one of: {}",
            runtime,
            CONTAINER_RUNTIME_VALUES.join(", ")
        )));
    }
    if LINUX_ONLY_CONTAINER_RUNTIMES.contains(&runtime) && spec.has_windows_agents() {
        return Err(Error::Compatibility(format!(
            "containerRuntime '{runtime}' is not supported on clusters with Windows agent pools"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        AgentPoolProfile, ClusterSpec, KubernetesConfig, OrchestratorProfile, OrchestratorType,
        OsType,
    };

    fn kubernetes_spec(config: KubernetesConfig) -> ClusterSpec {
        ClusterSpec {
            orchestrator_profile: OrchestratorProfile {
                orchestrator_type: OrchestratorType::Kubernetes,
                orchestrator_version: String::new(),
                orchestrator_release: String::new(),
                kubernetes_config: Some(config),
                dcos_config: None,
                openshift_config: None,
            },
            master_profile: None,
            agent_pool_profiles: Vec::new(),
            linux_profile: None,
            windows_profile: None,
            service_principal_profile: None,
            aad_profile: None,
            az_profile: None,
        }
    }

    fn windows_pool() -> AgentPoolProfile {
        AgentPoolProfile {
            os_type: OsType::Windows,
            ..AgentPoolProfile::default()
        }
    }

    #[test]
    fn test_every_known_policy_is_accepted() {
        for policy in NETWORK_POLICY_VALUES {
            let spec = kubernetes_spec(KubernetesConfig {
                network_policy: policy.to_string(),
                ..KubernetesConfig::default()
            });
            assert!(
                validate_network_policy(&spec).is_ok(),
                "rejected networkPolicy {policy:?}"
            );
        }
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let spec = kubernetes_spec(KubernetesConfig {
            network_policy: "not-existing".to_string(),
            ..KubernetesConfig::default()
        });
        assert!(validate_network_policy(&spec).is_err());
    }

    #[test]
    fn test_linux_only_policies_rejected_on_windows_pools() {
        for policy in ["calico", "cilium"] {
            let mut spec = kubernetes_spec(KubernetesConfig {
                network_policy: policy.to_string(),
                ..KubernetesConfig::default()
            });
            spec.agent_pool_profiles = vec![windows_pool()];
            assert!(
                validate_network_policy(&spec).is_err(),
                "accepted {policy:?} with Windows pools"
            );
        }
    }

    #[test]
    fn test_every_known_plugin_is_accepted() {
        for plugin in NETWORK_PLUGIN_VALUES {
            let spec = kubernetes_spec(KubernetesConfig {
                network_plugin: plugin.to_string(),
                ..KubernetesConfig::default()
            });
            assert!(
                validate_network_plugin(&spec).is_ok(),
                "rejected networkPlugin {plugin:?}"
            );
        }
    }

    #[test]
    fn test_unknown_plugin_is_rejected() {
        let spec = kubernetes_spec(KubernetesConfig {
            network_plugin: "not-existing".to_string(),
            ..KubernetesConfig::default()
        });
        assert!(validate_network_plugin(&spec).is_err());
    }

    #[test]
    fn test_allow_listed_pairs_are_accepted() {
        for (plugin, policy) in NETWORK_PLUGIN_PLUS_POLICY_ALLOWED {
            let spec = kubernetes_spec(KubernetesConfig {
                network_plugin: plugin.to_string(),
                network_policy: policy.to_string(),
                ..KubernetesConfig::default()
            });
            assert!(
                validate_network_plugin_plus_policy(&spec).is_ok(),
                "rejected pair ({plugin:?}, {policy:?})"
            );
        }
    }

    #[test]
    fn test_pairs_outside_the_allow_list_are_rejected() {
        for (plugin, policy) in [
            ("azure", "calico"),
            ("azure", "cilium"),
            ("azure", "azure"),
            ("kubenet", "none"),
            ("azure", "none"),
            ("kubenet", "kubenet"),
        ] {
            let spec = kubernetes_spec(KubernetesConfig {
                network_plugin: plugin.to_string(),
                network_policy: policy.to_string(),
                ..KubernetesConfig::default()
            });
            assert!(
                validate_network_plugin_plus_policy(&spec).is_err(),
                "accepted pair ({plugin:?}, {policy:?})"
            );
        }
    }

    #[test]
    fn test_every_known_runtime_is_accepted() {
        for runtime in CONTAINER_RUNTIME_VALUES {
            let spec = kubernetes_spec(KubernetesConfig {
                container_runtime: runtime.to_string(),
                ..KubernetesConfig::default()
            });
            assert!(
                validate_container_runtime(&spec).is_ok(),
                "rejected containerRuntime {runtime:?}"
            );
        }
    }

    #[test]
    fn test_unknown_runtime_is_rejected() {
        let spec = kubernetes_spec(KubernetesConfig {
            container_runtime: "not-existing".to_string(),
            ..KubernetesConfig::default()
        });
        assert!(validate_container_runtime(&spec).is_err());
    }

    #[test]
    fn test_sandboxed_runtime_rejected_on_windows_pools() {
        let mut spec = kubernetes_spec(KubernetesConfig {
            container_runtime: "clear-containers".to_string(),
            ..KubernetesConfig::default()
        });
        spec.agent_pool_profiles = vec![windows_pool()];
        assert!(validate_container_runtime(&spec).is_err());
    }
}
