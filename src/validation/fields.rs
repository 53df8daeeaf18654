//! Standalone field-syntax validators.
//!
//! These have no cross-field dependencies; config-level validators delegate
//! here and attach field context where the primitive does not already carry
//! it.

use std::net::Ipv4Addr;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use super::error::{Error, Result};

static LABEL_VALUE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]{0,61})?[A-Za-z0-9]$").ok());

static LABEL_KEY_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(([a-zA-Z0-9-]+\.)*[a-zA-Z0-9-]+/)?([A-Za-z0-9][-A-Za-z0-9_.]{0,61})?[A-Za-z0-9]$")
        .ok()
});

static GUID_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{8}-([0-9a-fA-F]{4}-){3}[0-9a-fA-F]{12}$").ok());

static KEYVAULT_ID_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^/subscriptions/\S+/resourceGroups/\S+/providers/Microsoft\.KeyVault/vaults/[^/\s]+$")
        .ok()
});

static DNS_PREFIX_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9-]{1,43}[a-zA-Z0-9]$").ok());

/// Longest allowed label-key prefix, the DNS-subdomain bound.
pub const MAX_LABEL_KEY_PREFIX_LEN: usize = 253;

/// A parsed IPv4 CIDR block.
///
/// `address` is the address exactly as written, which may have host bits
/// set; the network and broadcast addresses are derived from the masked
/// prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cidr {
    /// Address as written in the CIDR string.
    pub address: Ipv4Addr,
    /// Prefix length, 0 to 32.
    pub prefix_len: u8,
}

impl Cidr {
    fn mask(&self) -> u32 {
        if self.prefix_len == 0 {
            0
        } else {
            u32::MAX << (32 - u32::from(self.prefix_len))
        }
    }

    /// Network base address, host bits cleared.
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.address) & self.mask())
    }

    /// Broadcast address, host bits set.
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network()) | !self.mask())
    }

    /// Whether `ip` falls inside this block.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        u32::from(ip) & self.mask() == u32::from(self.network())
    }
}

/// Parse an IPv4 CIDR string such as `10.0.0.0/16`.
pub fn parse_cidr(cidr: &str) -> Option<Cidr> {
    let (address, prefix_len) = cidr.split_once('/')?;
    let address: Ipv4Addr = address.parse().ok()?;
    let prefix_len: u8 = prefix_len.parse().ok()?;
    (prefix_len <= 32).then_some(Cidr {
        address,
        prefix_len,
    })
}

/// Syntax-check a CIDR field, naming the field in the error.
pub fn validate_cidr(field: &str, value: &str) -> Result<Cidr> {
    parse_cidr(value)
        .ok_or_else(|| Error::Format(format!("{field} '{value}' is an invalid subnet")))
}

/// Validate a duration flag value such as `10s` or `5m0s`, naming the
/// field in the error.
pub fn validate_duration(field: &str, value: &str) -> Result<Duration> {
    humantime::parse_duration(value)
        .map_err(|_| Error::Format(format!("{field} '{value}' is not a valid duration")))
}

/// Validate a Kubernetes label value. Empty values are allowed.
pub fn validate_label_value(value: &str) -> Result<()> {
    let ok = value.is_empty()
        || LABEL_VALUE_RE
            .as_ref()
            .is_some_and(|re| re.is_match(value));
    if !ok {
        return Err(Error::Format(format!(
            "label value '{value}' is invalid. Valid label values must be 63 characters or less \
             and must be empty or begin and end with an alphanumeric character ([a-z0-9A-Z]) \
             with dashes (-), underscores (_), dots (.), and alphanumerics between"
        )));
    }
    Ok(())
}

/// Validate a Kubernetes label key: an optional DNS-subdomain prefix
/// followed by `/`, then a mandatory name segment.
pub fn validate_label_key(key: &str) -> Result<()> {
    let mut ok = LABEL_KEY_RE.as_ref().is_some_and(|re| re.is_match(key));
    if ok {
        if let Some((prefix, _)) = key.split_once('/') {
            ok = prefix.len() <= MAX_LABEL_KEY_PREFIX_LEN;
        }
    }
    if !ok {
        return Err(Error::Format(format!(
            "label key '{key}' is invalid. Valid label keys have two segments: an optional \
             prefix and name, separated by a slash (/). The name segment is required and must \
             be 63 characters or less, beginning and ending with an alphanumeric character \
             ([a-z0-9A-Z]) with dashes (-), underscores (_), dots (.), and alphanumerics \
             between. The prefix is optional; if specified it must be a DNS subdomain no \
             longer than 253 characters"
        )));
    }
    Ok(())
}

/// Validate a canonical hyphenated GUID such as
/// `92444486-5bc3-4291-818b-d53ae480991b`, naming the field in the error.
pub fn validate_guid(field: &str, value: &str) -> Result<()> {
    if !GUID_RE.as_ref().is_some_and(|re| re.is_match(value)) {
        return Err(Error::Format(format!("{field} '{value}' is not a valid GUID")));
    }
    Ok(())
}

/// Shape-check a key vault resource ID. The message text is part of the
/// CLI contract.
pub fn validate_keyvault_resource_id(vault_id: &str) -> Result<()> {
    if !KEYVAULT_ID_RE
        .as_ref()
        .is_some_and(|re| re.is_match(vault_id))
    {
        return Err(Error::Format(
            "service principal client keyvault secret reference is of incorrect format".to_string(),
        ));
    }
    Ok(())
}

/// Validate a DNS name prefix for the cluster's public endpoints.
pub fn validate_dns_prefix(prefix: &str) -> Result<()> {
    if !DNS_PREFIX_RE.as_ref().is_some_and(|re| re.is_match(prefix)) {
        return Err(Error::Format(format!(
            "DNS prefix '{prefix}' is invalid. It must contain between 3 and 45 characters, \
             start with a letter, end with a letter or a number, and contain only letters, \
             numbers, and hyphens"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cidr_valid() {
        let cidr = parse_cidr("10.120.0.0/16").unwrap();
        assert_eq!(cidr.network(), Ipv4Addr::new(10, 120, 0, 0));
        assert_eq!(cidr.broadcast(), Ipv4Addr::new(10, 120, 255, 255));
        assert!(cidr.contains(Ipv4Addr::new(10, 120, 3, 4)));
        assert!(!cidr.contains(Ipv4Addr::new(10, 121, 0, 1)));
    }

    #[test]
    fn test_parse_cidr_masks_host_bits() {
        let cidr = parse_cidr("172.99.0.1/16").unwrap();
        assert_eq!(cidr.address, Ipv4Addr::new(172, 99, 0, 1));
        assert_eq!(cidr.network(), Ipv4Addr::new(172, 99, 0, 0));
        assert_eq!(cidr.broadcast(), Ipv4Addr::new(172, 99, 255, 255));
    }

    #[test]
    fn test_parse_cidr_extremes() {
        assert!(parse_cidr("0.0.0.0/0").is_some());
        let host = parse_cidr("10.0.0.1/32").unwrap();
        assert!(host.contains(Ipv4Addr::new(10, 0, 0, 1)));
        assert!(!host.contains(Ipv4Addr::new(10, 0, 0, 2)));
    }

    #[test]
    fn test_parse_cidr_invalid() {
        for bad in [
            "10.16.x.0/invalid",
            "10.120.1.0/invalid",
            "192.168.0.0/not-a-len",
            "192.168.0.0/33",
            "192.168.0.0",
            "not-a-cidr",
            "",
        ] {
            assert!(parse_cidr(bad).is_none(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_validate_duration() {
        assert_eq!(
            validate_duration("--node-status-update-frequency", "10s").unwrap(),
            Duration::from_secs(10)
        );
        assert_eq!(
            validate_duration("--pod-eviction-timeout", "5m0s").unwrap(),
            Duration::from_secs(300)
        );
        assert!(validate_duration("--pod-eviction-timeout", "invalid").is_err());
        assert!(validate_duration("--pod-eviction-timeout", "").is_err());
    }

    #[test]
    fn test_label_values() {
        let valid = [
            "",
            "a",
            "a1",
            "this--valid--label--is--exactly--sixty--three--characters--long",
            "123456",
            "my-label_valid.com",
        ];
        let invalid = [
            "a$$b",
            "-abc",
            "not.valid.",
            "This____long____label___is______sixty______four_____chararacters",
            "Label with spaces",
        ];

        for value in valid {
            assert!(validate_label_value(value).is_ok(), "rejected {value:?}");
        }
        for value in invalid {
            assert!(validate_label_value(value).is_err(), "accepted {value:?}");
        }
    }

    #[test]
    fn test_label_keys() {
        let long_prefix = format!("{}/my-key", "a".repeat(253));
        let over_long_prefix = format!("{}/my-key", "a".repeat(254));
        let valid = [
            "a",
            "a1",
            "this--valid--label--is--exactly--sixty--three--characters--long",
            "123456",
            "my-label_valid.com",
            "foo.bar/name",
            "1.2321.324/key_name.foo",
            long_prefix.as_str(),
        ];
        let invalid = [
            "",
            "a/b/c",
            ".startswithdot",
            "spaces in key",
            "foo/",
            "/name",
            "$.$/com",
            over_long_prefix.as_str(),
            "wrong-slash\\foo",
        ];

        for key in valid {
            assert!(validate_label_key(key).is_ok(), "rejected {key:?}");
        }
        for key in invalid {
            assert!(validate_label_key(key).is_err(), "accepted {key:?}");
        }
    }

    #[test]
    fn test_guids() {
        assert!(validate_guid("clientAppID", "92444486-5bc3-4291-818b-d53ae480991b").is_ok());
        assert!(validate_guid("clientAppID", "FEB784F6-7174-46DA-AEAE-DA66E80C7A11").is_ok());
        for bad in [
            "",
            "1",
            "d",
            "92444486-5bc3-4291-818b",
            "924444865bc34291818bd53ae480991b",
            "{92444486-5bc3-4291-818b-d53ae480991b}",
        ] {
            assert!(validate_guid("clientAppID", bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_keyvault_resource_id() {
        assert!(validate_keyvault_resource_id(
            "/subscriptions/SUB-ID/resourceGroups/RG-NAME/providers/Microsoft.KeyVault/vaults/KV-NAME"
        )
        .is_ok());

        let err = validate_keyvault_resource_id("randomID").unwrap_err();
        assert_eq!(
            err.to_string(),
            "service principal client keyvault secret reference is of incorrect format"
        );
        assert!(validate_keyvault_resource_id(
            "/subscriptions/SUB-ID/resourceGroups/RG-NAME/providers/Microsoft.Compute/vaults/KV-NAME"
        )
        .is_err());
    }

    #[test]
    fn test_dns_prefix() {
        assert!(validate_dns_prefix("foo").is_ok());
        assert!(validate_dns_prefix("my-cluster-01").is_ok());
        assert!(validate_dns_prefix("fo").is_err());
        assert!(validate_dns_prefix("1leadingdigit").is_err());
        assert!(validate_dns_prefix("trailing-").is_err());
        assert!(validate_dns_prefix(&"a".repeat(46)).is_err());
    }
}
