//! API model for ClusterForge cluster templates.
//!
//! - `ClusterSpec`: the root description of a to-be-deployed cluster
//! - `OrchestratorProfile`: orchestrator selection plus per-orchestrator
//!   configuration blocks
//! - Pool, host, and identity profiles
//!
//! The model is produced by an external loader and treated as immutable:
//! validation accepts or rejects a `ClusterSpec` as a whole and never
//! defaults or rewrites fields.

mod cluster;
mod identity;
mod orchestrator;

pub use cluster::*;
pub use identity::*;
pub use orchestrator::*;
