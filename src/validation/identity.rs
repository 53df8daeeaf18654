//! Service principal and AAD identity validation.

use crate::api::{AadProfile, ServicePrincipalProfile};

use super::error::{Error, Result};
use super::fields::{validate_guid, validate_keyvault_resource_id};

/// Validate the service principal credential shape: a client ID plus
/// exactly one of the inline secret or a keyvault secret reference.
pub fn validate_service_principal(profile: &ServicePrincipalProfile) -> Result<()> {
    if profile.client_id.is_empty() {
        return Err(Error::MissingField(
            "service principal clientId must be specified".to_string(),
        ));
    }

    match (!profile.secret.is_empty(), profile.keyvault_secret_ref.as_ref()) {
        (true, Some(_)) => Err(Error::MutualExclusion(
            "service principal client secret and keyvault secret reference cannot both be set"
                .to_string(),
        )),
        (false, None) => Err(Error::MutualExclusion(
            "either the service principal client secret or a keyvault secret reference must be \
             specified"
                .to_string(),
        )),
        (false, Some(secret_ref)) => {
            validate_keyvault_resource_id(&secret_ref.vault_id)?;
            if secret_ref.secret_name.is_empty() {
                return Err(Error::MissingField(
                    "service principal keyvault secret reference must name a secret".to_string(),
                ));
            }
            // secret_version is optional; any string is accepted.
            Ok(())
        }
        (true, None) => Ok(()),
    }
}

/// Validate the AAD profile: both application IDs are mandatory GUIDs, the
/// tenant ID is an optional GUID.
pub fn validate_aad_profile(profile: &AadProfile) -> Result<()> {
    if profile.client_app_id.is_empty() {
        return Err(Error::MissingField(
            "aadProfile.clientAppID must be specified".to_string(),
        ));
    }
    validate_guid("aadProfile.clientAppID", &profile.client_app_id)?;

    if profile.server_app_id.is_empty() {
        return Err(Error::MissingField(
            "aadProfile.serverAppID must be specified".to_string(),
        ));
    }
    validate_guid("aadProfile.serverAppID", &profile.server_app_id)?;

    if !profile.tenant_id.is_empty() {
        validate_guid("aadProfile.tenantID", &profile.tenant_id)?;
    }
    Ok(())
}
