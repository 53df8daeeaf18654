//! Orchestrator version catalog.
//!
//! Answers which versions each orchestrator offers for new clusters, which
//! older builds are still recognized on existing clusters, and which
//! versions clusters with Windows agent pools may run. The catalog is plain
//! data supplied to the validation engine synchronously; nothing is fetched
//! during validation.

use semver::Version;

use crate::api::OrchestratorType;

/// One catalog row: a version the orchestrator has ever shipped.
struct CatalogEntry {
    version: &'static str,
    /// Offered for new clusters. Deprecated patch levels keep their row
    /// with `supported = false` so upgrade validation still recognizes
    /// them.
    supported: bool,
    /// Eligible for clusters with Windows agent pools.
    windows: bool,
}

const fn entry(version: &'static str, supported: bool, windows: bool) -> CatalogEntry {
    CatalogEntry {
        version,
        supported,
        windows,
    }
}

const KUBERNETES_CATALOG: &[CatalogEntry] = &[
    entry("1.6.6", false, false),
    entry("1.6.9", false, false),
    entry("1.6.11", false, false),
    entry("1.6.12", false, false),
    entry("1.6.13", false, false),
    entry("1.7.0", false, false),
    entry("1.7.1", false, false),
    entry("1.7.2", false, false),
    entry("1.7.3", false, false),
    entry("1.7.4", false, false),
    entry("1.7.5", false, false),
    entry("1.7.7", true, true),
    entry("1.7.9", true, true),
    entry("1.7.10", true, true),
    entry("1.7.12", true, true),
    entry("1.8.0", true, true),
    entry("1.8.1", true, true),
    entry("1.8.2", true, true),
    entry("1.8.4", true, true),
    entry("1.8.6", true, true),
    entry("1.8.7", true, true),
    entry("1.8.9", true, true),
    entry("1.8.10", true, true),
    entry("1.9.0", true, true),
    entry("1.9.1", true, true),
    entry("1.9.2", true, true),
    entry("1.9.3", true, true),
    entry("1.9.4", true, true),
    entry("1.9.5", true, true),
    entry("1.9.6", true, true),
    entry("1.10.0", true, true),
];

const DCOS_CATALOG: &[CatalogEntry] = &[
    entry("1.8.4", false, false),
    entry("1.8.8", true, false),
    entry("1.9.0", true, false),
    entry("1.9.8", true, false),
    entry("1.10.0", true, false),
    entry("1.11.0", true, false),
];

const OPENSHIFT_CATALOG: &[CatalogEntry] = &[entry("3.9.0", true, false)];

/// Kubernetes version assumed when neither version nor release is set.
pub const KUBERNETES_DEFAULT_VERSION: &str = "1.8.10";
/// DC/OS version assumed when neither version nor release is set.
pub const DCOS_DEFAULT_VERSION: &str = "1.11.0";
/// OpenShift version assumed when neither version nor release is set.
pub const OPENSHIFT_DEFAULT_VERSION: &str = "3.9.0";

fn catalog(orchestrator: OrchestratorType) -> &'static [CatalogEntry] {
    match orchestrator {
        OrchestratorType::Kubernetes => KUBERNETES_CATALOG,
        OrchestratorType::Dcos => DCOS_CATALOG,
        OrchestratorType::OpenShift => OPENSHIFT_CATALOG,
        OrchestratorType::Swarm | OrchestratorType::SwarmMode => &[],
    }
}

/// Default version for the given orchestrator, empty for orchestrators
/// that carry no catalog.
pub fn default_version(orchestrator: OrchestratorType) -> &'static str {
    match orchestrator {
        OrchestratorType::Kubernetes => KUBERNETES_DEFAULT_VERSION,
        OrchestratorType::Dcos => DCOS_DEFAULT_VERSION,
        OrchestratorType::OpenShift => OPENSHIFT_DEFAULT_VERSION,
        OrchestratorType::Swarm | OrchestratorType::SwarmMode => "",
    }
}

/// Strip the optional leading `v` from a user-supplied version.
pub fn normalize(version: &str) -> &str {
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
}

/// All versions offered for new clusters of the given orchestrator.
pub fn all_supported_versions(orchestrator: OrchestratorType) -> Vec<&'static str> {
    catalog(orchestrator)
        .iter()
        .filter(|entry| entry.supported)
        .map(|entry| entry.version)
        .collect()
}

/// All versions offered for new clusters with Windows agent pools.
pub fn all_supported_versions_windows(orchestrator: OrchestratorType) -> Vec<&'static str> {
    catalog(orchestrator)
        .iter()
        .filter(|entry| entry.supported && entry.windows)
        .map(|entry| entry.version)
        .collect()
}

/// Every version the orchestrator has ever shipped, deprecated included.
pub fn all_known_versions(orchestrator: OrchestratorType) -> Vec<&'static str> {
    catalog(orchestrator)
        .iter()
        .map(|entry| entry.version)
        .collect()
}

/// Whether `version` is offered for new clusters.
pub fn is_supported_version(
    orchestrator: OrchestratorType,
    version: &str,
    windows: bool,
) -> bool {
    let version = normalize(version);
    catalog(orchestrator)
        .iter()
        .any(|entry| entry.supported && (!windows || entry.windows) && entry.version == version)
}

/// Whether `version` has ever shipped for the orchestrator, deprecated
/// patch levels included.
pub fn is_known_version(orchestrator: OrchestratorType, version: &str) -> bool {
    let version = normalize(version);
    catalog(orchestrator)
        .iter()
        .any(|entry| entry.version == version)
}

/// Filter `versions` down to those semver-greater than `floor`. Entries
/// that do not parse are dropped.
pub fn versions_gt<'a>(versions: &[&'a str], floor: &str, inclusive: bool) -> Vec<&'a str> {
    let Ok(floor) = Version::parse(normalize(floor)) else {
        return Vec::new();
    };
    versions
        .iter()
        .copied()
        .filter(|candidate| match Version::parse(normalize(candidate)) {
            Ok(parsed) => {
                if inclusive {
                    parsed >= floor
                } else {
                    parsed > floor
                }
            }
            Err(_) => false,
        })
        .collect()
}

/// True when `version` parses as semver and is at least `floor`.
pub fn version_at_least(version: &str, floor: &str) -> bool {
    match (
        Version::parse(normalize(version)),
        Version::parse(normalize(floor)),
    ) {
        (Ok(version), Ok(floor)) => version >= floor,
        _ => false,
    }
}

/// Resolve a `major.minor` release to the newest supported full version.
pub fn resolve_release(
    orchestrator: OrchestratorType,
    release: &str,
    windows: bool,
) -> Option<&'static str> {
    newest_matching(orchestrator, release, |entry| {
        entry.supported && (!windows || entry.windows)
    })
}

/// Resolve a `major.minor` release against everything the orchestrator has
/// ever shipped. Used for clusters that already exist.
pub fn resolve_release_any(
    orchestrator: OrchestratorType,
    release: &str,
) -> Option<&'static str> {
    newest_matching(orchestrator, release, |_| true)
}

fn newest_matching(
    orchestrator: OrchestratorType,
    release: &str,
    eligible: impl Fn(&CatalogEntry) -> bool,
) -> Option<&'static str> {
    let release = normalize(release);
    let (major, minor) = release.split_once('.')?;
    let major: u64 = major.parse().ok()?;
    let minor: u64 = minor.parse().ok()?;
    catalog(orchestrator)
        .iter()
        .filter(|entry| eligible(entry))
        .filter_map(|entry| {
            Version::parse(entry.version)
                .ok()
                .map(|parsed| (parsed, entry.version))
        })
        .filter(|(parsed, _)| parsed.major == major && parsed.minor == minor)
        .max_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, version)| version)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_v_prefix() {
        assert_eq!(normalize("v1.9.0"), "1.9.0");
        assert_eq!(normalize("V1.9.0"), "1.9.0");
        assert_eq!(normalize("1.9.0"), "1.9.0");
    }

    #[test]
    fn test_windows_versions_are_a_subset_of_supported() {
        let supported = all_supported_versions(OrchestratorType::Kubernetes);
        for version in all_supported_versions_windows(OrchestratorType::Kubernetes) {
            assert!(supported.contains(&version), "{version} not supported");
        }
    }

    #[test]
    fn test_deprecated_versions_are_known_but_not_supported() {
        assert!(is_known_version(OrchestratorType::Kubernetes, "1.7.3"));
        assert!(!is_supported_version(
            OrchestratorType::Kubernetes,
            "1.7.3",
            false
        ));
    }

    #[test]
    fn test_resolve_release_picks_newest_patch() {
        assert_eq!(
            resolve_release(OrchestratorType::Kubernetes, "1.8", false),
            Some("1.8.10")
        );
        assert_eq!(
            resolve_release(OrchestratorType::Kubernetes, "1.9", false),
            Some("1.9.6")
        );
    }

    #[test]
    fn test_resolve_release_rejects_unknown_release() {
        assert_eq!(resolve_release(OrchestratorType::Kubernetes, "1.4", false), None);
        assert_eq!(resolve_release(OrchestratorType::Kubernetes, "junk", false), None);
        assert_eq!(resolve_release(OrchestratorType::Kubernetes, "1.9.0", false), None);
    }

    #[test]
    fn test_resolve_release_any_covers_deprecated_lines() {
        assert_eq!(
            resolve_release_any(OrchestratorType::Kubernetes, "1.6"),
            Some("1.6.13")
        );
    }

    #[test]
    fn test_versions_gt_inclusive_and_exclusive() {
        let versions = ["1.7.12", "1.8.0", "1.9.0"];
        assert_eq!(versions_gt(&versions, "1.8.0", true), vec!["1.8.0", "1.9.0"]);
        assert_eq!(versions_gt(&versions, "1.8.0", false), vec!["1.9.0"]);
    }

    #[test]
    fn test_version_at_least() {
        assert!(version_at_least("1.8.0", "1.8.0"));
        assert!(version_at_least("v1.9.0", "1.8.0"));
        assert!(!version_at_least("1.7.12", "1.8.0"));
        assert!(!version_at_least("junk", "1.8.0"));
    }
}
