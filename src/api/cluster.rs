//! Root cluster description plus pool and host profiles.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::identity::{AadProfile, ServicePrincipalProfile};
use super::orchestrator::OrchestratorProfile;

/// Storage profile backed by unmanaged storage accounts.
pub const STORAGE_ACCOUNT: &str = "StorageAccount";
/// Storage profile backed by managed disks.
pub const MANAGED_DISKS: &str = "ManagedDisks";
/// Accepted `storageProfile` values. Empty means "tool default".
pub const STORAGE_PROFILE_VALUES: [&str; 3] = ["", STORAGE_ACCOUNT, MANAGED_DISKS];

/// Availability-set placement.
pub const AVAILABILITY_SET: &str = "AvailabilitySet";
/// Scale-set placement.
pub const VIRTUAL_MACHINE_SCALE_SETS: &str = "VirtualMachineScaleSets";
/// Accepted `availabilityProfile` values. Empty means "tool default".
pub const AVAILABILITY_PROFILE_VALUES: [&str; 3] =
    ["", AVAILABILITY_SET, VIRTUAL_MACHINE_SCALE_SETS];

/// Operating system of a node pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub enum OsType {
    /// Linux nodes.
    #[default]
    Linux,
    /// Windows nodes.
    Windows,
}

impl std::fmt::Display for OsType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsType::Linux => write!(f, "Linux"),
            OsType::Windows => write!(f, "Windows"),
        }
    }
}

/// Declarative description of a to-be-deployed cluster.
///
/// This is the unit of validation: a spec is accepted or rejected as a
/// whole, with the first failing rule reported.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Orchestrator selection and tunables.
    pub orchestrator_profile: OrchestratorProfile,

    /// Control-plane pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_profile: Option<MasterPoolProfile>,

    /// Worker pools.
    #[serde(default)]
    pub agent_pool_profiles: Vec<AgentPoolProfile>,

    /// Admin account and SSH access for Linux nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linux_profile: Option<LinuxProfile>,

    /// Admin account for Windows nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows_profile: Option<WindowsProfile>,

    /// Credentials the orchestrator uses against the cloud provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_principal_profile: Option<ServicePrincipalProfile>,

    /// AAD integration for API-server authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aad_profile: Option<AadProfile>,

    /// Subscription placement of the cluster's resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub az_profile: Option<AzProfile>,
}

impl ClusterSpec {
    /// True when any agent pool runs Windows.
    pub fn has_windows_agents(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .any(|pool| pool.os_type == OsType::Windows)
    }
}

/// Control-plane pool description.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MasterPoolProfile {
    /// Number of control-plane nodes.
    #[serde(default)]
    pub count: i32,

    /// DNS name prefix for the cluster's public endpoints.
    #[serde(default)]
    pub dns_prefix: String,

    /// VM size for control-plane nodes.
    #[serde(default)]
    pub vm_size: String,

    /// Disk kind backing the nodes.
    #[serde(default)]
    pub storage_profile: String,

    /// Custom node image, both fields or neither.
    #[serde(default, rename = "imageReference", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<ImageRef>,
}

/// Worker pool description.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentPoolProfile {
    /// Pool name, used in node host names.
    #[serde(default)]
    pub name: String,

    /// Number of nodes in the pool.
    #[serde(default)]
    pub count: i32,

    /// VM size for the pool's nodes.
    #[serde(default)]
    pub vm_size: String,

    /// Operating system of the pool's nodes.
    #[serde(default)]
    pub os_type: OsType,

    /// Placement strategy for the pool.
    #[serde(default)]
    pub availability_profile: String,

    /// Disk kind backing the nodes.
    #[serde(default)]
    pub storage_profile: String,

    /// Kubernetes labels applied to every node in the pool.
    #[serde(default)]
    pub custom_node_labels: BTreeMap<String, String>,

    /// Custom node image, both fields or neither.
    #[serde(default, rename = "imageReference", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<ImageRef>,
}

/// Reference to a custom node image by name and resource group.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    /// Image name.
    #[serde(default)]
    pub name: String,

    /// Resource group holding the image.
    #[serde(default)]
    pub resource_group: String,
}

/// Admin account and SSH access for Linux nodes.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinuxProfile {
    /// Admin user name on every Linux node.
    #[serde(default)]
    pub admin_username: String,

    /// SSH access configuration.
    #[serde(default)]
    pub ssh: SshConfig,
}

/// SSH public keys granted access to Linux nodes.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SshConfig {
    /// Authorized keys. Exactly one is expected.
    #[serde(default)]
    pub public_keys: Vec<PublicKey>,
}

/// A single SSH public key.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicKey {
    /// Key material in authorized_keys format.
    #[serde(default)]
    pub key_data: String,
}

/// Admin account for Windows nodes.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WindowsProfile {
    /// Admin user name on every Windows node.
    #[serde(default)]
    pub admin_username: String,

    /// Admin password on every Windows node.
    #[serde(default)]
    pub admin_password: String,
}

/// Subscription placement of the cluster's resources.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AzProfile {
    /// Region to deploy into.
    #[serde(default)]
    pub location: String,

    /// Resource group to deploy into.
    #[serde(default)]
    pub resource_group: String,

    /// Subscription owning the resource group.
    #[serde(default)]
    pub subscription_id: String,

    /// Tenant owning the subscription.
    #[serde(default)]
    pub tenant_id: String,
}
