//! Error types for the validation engine.
//!
//! Every variant is a caller-fixable input error; the engine itself has no
//! failure modes and nothing here is ever retried. Variants Display as the
//! bare message because surrounding tooling shows and in some cases matches
//! on the text.

use thiserror::Error;

/// Error type for cluster validation
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed CIDR, duration, GUID, or resource-ID string
    #[error("{0}")]
    Format(String),

    /// Numeric floor or cross-field consistency violation
    #[error("{0}")]
    Range(String),

    /// Both of a mutually exclusive pair, or neither of a required pair
    #[error("{0}")]
    MutualExclusion(String),

    /// A required field or profile was not supplied
    #[error("{0}")]
    MissingField(String),

    /// Values individually valid but disallowed in combination
    #[error("{0}")]
    Compatibility(String),

    /// Requested version or release outside the supported set
    #[error("{0}")]
    UnsupportedVersion(String),

    /// Wrong orchestrator-specific block populated, or pool shapes that do
    /// not fit the declared orchestrator
    #[error("{0}")]
    Structural(String),
}

/// Result type alias for validation operations
pub type Result<T> = std::result::Result<T, Error>;
