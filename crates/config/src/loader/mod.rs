//! Cluster configuration loader for environment variables and files.
//!
//! Responsibilities:
//! - Load cluster configuration from `.env` files, environment variables, and JSON files.
//! - Provide a builder-pattern `ClusterConfigLoader` for hierarchical configuration merging.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Managing the lifecycle of the cluster being described.
//! - Resolving connection profiles (see client crate).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - Environment variables take precedence over file values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;
mod file;

pub use builder::ClusterConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;
