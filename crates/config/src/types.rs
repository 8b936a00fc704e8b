//! Configuration types for esharness.

mod auth;
mod cluster;

pub use auth::AdminCredentials;
pub use cluster::ClusterConfiguration;
