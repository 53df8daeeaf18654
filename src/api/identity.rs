//! Identity and credential profiles.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Credentials the orchestrator uses against the cloud provider.
///
/// The secret is supplied either inline or as a keyvault reference,
/// never both.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicePrincipalProfile {
    /// Application ID of the service principal.
    #[serde(default)]
    pub client_id: String,

    /// Inline client secret.
    #[serde(default)]
    pub secret: String,

    /// Vaulted client secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyvault_secret_ref: Option<KeyvaultSecretRef>,
}

/// Pointer to a secret stored in a key vault.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyvaultSecretRef {
    /// Full resource ID of the vault.
    #[serde(default, rename = "vaultID")]
    pub vault_id: String,

    /// Name of the secret within the vault.
    #[serde(default)]
    pub secret_name: String,

    /// Specific secret version. Empty means "latest".
    #[serde(default)]
    pub secret_version: String,
}

/// AAD integration for API-server authentication.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AadProfile {
    /// Client application ID.
    #[serde(default, rename = "clientAppID")]
    pub client_app_id: String,

    /// Server application ID.
    #[serde(default, rename = "serverAppID")]
    pub server_app_id: String,

    /// Tenant ID. Empty means "derive from the subscription".
    #[serde(default, rename = "tenantID")]
    pub tenant_id: String,
}
