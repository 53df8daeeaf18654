//! Orchestrator selection and per-orchestrator configuration blocks.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The cluster management system being deployed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub enum OrchestratorType {
    /// Kubernetes
    Kubernetes,
    /// DC/OS
    #[serde(rename = "DCOS")]
    Dcos,
    /// Docker Swarm (standalone)
    Swarm,
    /// Docker Swarm Mode
    SwarmMode,
    /// OpenShift
    OpenShift,
}

impl std::fmt::Display for OrchestratorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchestratorType::Kubernetes => write!(f, "Kubernetes"),
            OrchestratorType::Dcos => write!(f, "DCOS"),
            OrchestratorType::Swarm => write!(f, "Swarm"),
            OrchestratorType::SwarmMode => write!(f, "SwarmMode"),
            OrchestratorType::OpenShift => write!(f, "OpenShift"),
        }
    }
}

/// Which orchestrator to deploy, at which version, with its tunables.
///
/// `orchestrator_version` and `orchestrator_release` are convenience
/// alternatives: a full version pins an exact build, a `major.minor`
/// release resolves to the newest matching supported version. At most one
/// may be set.
///
/// Only the configuration block matching `orchestrator_type` may carry
/// non-default values; a populated block of another kind is rejected by
/// validation.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorProfile {
    /// Orchestrator to deploy.
    pub orchestrator_type: OrchestratorType,

    /// Full target version, e.g. `1.9.0`. A leading `v` is tolerated.
    #[serde(default)]
    pub orchestrator_version: String,

    /// `major.minor` release shorthand, e.g. `1.9`.
    #[serde(default)]
    pub orchestrator_release: String,

    /// Kubernetes tunables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_config: Option<KubernetesConfig>,

    /// DC/OS tunables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dcos_config: Option<DcosConfig>,

    /// OpenShift tunables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openshift_config: Option<OpenShiftConfig>,
}

/// Flat mapping of the Kubernetes parameters the provisioning tool accepts.
///
/// `kubelet_config` and `controller_manager_config` are open-ended
/// passthrough maps of command-line flags for the respective processes.
/// Validation inspects a known subset of keys and ignores the rest.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesConfig {
    /// Pod address space in CIDR notation.
    #[serde(default)]
    pub cluster_subnet: String,

    /// Docker bridge address space in CIDR notation.
    #[serde(default)]
    pub docker_bridge_subnet: String,

    /// Cluster DNS service address. Requires `service_cidr`.
    #[serde(default, rename = "dnsServiceIP")]
    pub dns_service_ip: String,

    /// Service address space in CIDR notation. Requires `dns_service_ip`.
    #[serde(default)]
    pub service_cidr: String,

    /// Per-node pod limit. Zero means "tool default".
    #[serde(default)]
    pub max_pods: i32,

    /// CNI plugin wiring pod networking.
    #[serde(default)]
    pub network_plugin: String,

    /// Network policy enforcement add-on.
    #[serde(default)]
    pub network_policy: String,

    /// Container runtime for agent nodes.
    #[serde(default)]
    pub container_runtime: String,

    /// Enable exponential backoff for cloud-provider API calls.
    #[serde(default)]
    pub cloud_provider_backoff: bool,

    /// Backoff retry attempts.
    #[serde(default)]
    pub cloud_provider_backoff_retries: i32,

    /// Backoff jitter factor.
    #[serde(default)]
    pub cloud_provider_backoff_jitter: f64,

    /// Initial backoff delay in seconds.
    #[serde(default)]
    pub cloud_provider_backoff_duration: i32,

    /// Backoff growth exponent.
    #[serde(default)]
    pub cloud_provider_backoff_exponent: f64,

    /// Enable client-side rate limiting for cloud-provider API calls.
    #[serde(default)]
    pub cloud_provider_rate_limit: bool,

    /// Sustained queries per second under rate limiting.
    #[serde(default, rename = "cloudProviderRateLimitQPS")]
    pub cloud_provider_rate_limit_qps: f64,

    /// Burst bucket size under rate limiting.
    #[serde(default)]
    pub cloud_provider_rate_limit_bucket: i32,

    /// Run the cloud controller manager as a separate process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_cloud_controller_manager: Option<bool>,

    /// Passthrough kubelet command-line flags.
    #[serde(default)]
    pub kubelet_config: BTreeMap<String, String>,

    /// Passthrough controller-manager command-line flags.
    #[serde(default)]
    pub controller_manager_config: BTreeMap<String, String>,
}

impl KubernetesConfig {
    /// True when any field differs from its default.
    pub fn is_populated(&self) -> bool {
        *self != Self::default()
    }
}

/// DC/OS-specific configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DcosConfig {
    /// Bootstrap package location for Linux nodes.
    #[serde(default, rename = "dcosBootstrapURL")]
    pub dcos_bootstrap_url: String,

    /// Bootstrap package location for Windows nodes.
    #[serde(default, rename = "dcosWindowsBootstrapURL")]
    pub dcos_windows_bootstrap_url: String,
}

impl DcosConfig {
    /// True when any field differs from its default.
    pub fn is_populated(&self) -> bool {
        *self != Self::default()
    }
}

/// OpenShift-specific configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenShiftConfig {
    /// Initial cluster admin user.
    #[serde(default)]
    pub cluster_username: String,

    /// Initial cluster admin password.
    #[serde(default)]
    pub cluster_password: String,
}

impl OpenShiftConfig {
    /// True when any field differs from its default.
    pub fn is_populated(&self) -> bool {
        *self != Self::default()
    }
}
