//! Cluster configuration for esharness.
//!
//! This crate provides the description of a search backend deployment
//! (`ClusterConfiguration`) and loaders that assemble it from builder
//! calls, environment variables, and JSON files.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ClusterConfigLoader, ConfigError, env_var_or_none};
pub use types::{AdminCredentials, ClusterConfiguration};
