//! clusterforge-api library crate
//!
//! API model and semantic validation for ClusterForge cluster descriptions.
//! Given a declarative description of a to-be-deployed cluster, the
//! validation engine decides whether it is internally consistent and
//! deployable before any infrastructure template is generated.
//!
//! The crate exports three surfaces:
//! - [`api`]: the immutable cluster description model
//! - [`validation`]: the rule engine, entered through
//!   [`validate_cluster`]
//! - [`versions`]: the orchestrator version catalog consumed by the
//!   version gate

pub mod api;
pub mod validation;
pub mod versions;

pub use validation::{validate_cluster, Error, Result};
