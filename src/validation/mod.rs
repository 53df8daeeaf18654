//! Semantic validation for cluster descriptions.
//!
//! Rules are organized by concern:
//! - `fields`: standalone syntax checks (CIDR, durations, labels, GUIDs)
//! - `kubernetes`: the Kubernetes configuration block
//! - `network`: plugin/policy/runtime compatibility
//! - `identity`: service principal and AAD profiles
//! - `orchestrator`: config-block matching and the version gate
//! - `cluster`: the single-pass top-level composition
//!
//! Every rule is a pure, synchronous function over the immutable API model;
//! there is no shared state, no I/O, and no retry. Distinct cluster
//! descriptions may be validated concurrently without coordination. Rules
//! run in a fixed order and the first failure is the one reported.

pub mod cluster;
pub mod error;
pub mod fields;
pub mod identity;
pub mod kubernetes;
pub mod network;
pub mod orchestrator;

pub use cluster::validate_cluster;
pub use error::{Error, Result};
