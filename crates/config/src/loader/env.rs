//! Environment variable parsing for cluster configuration.
//!
//! Responsibilities:
//! - Read and parse `ESHARNESS_*` environment variables.
//! - Apply environment variable values to a `ClusterConfigLoader` instance.
//!
//! Does NOT handle:
//! - Loading from JSON files (see file.rs).
//! - Building the final configuration (see builder.rs).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid boolean values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::path::PathBuf;

use super::builder::ClusterConfigLoader;
use super::error::ConfigError;
use crate::constants::{
    ENV_ADMIN_PASSWORD, ENV_ADMIN_USERNAME, ENV_CA_CERT, ENV_CLUSTER_NAME, ENV_CONFIG_PATH,
    ENV_NODES, ENV_SECURITY_ENABLED, ENV_TLS_ENABLED,
};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        })
    }
}

/// Split a comma-separated node list, dropping empty segments.
fn parse_nodes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|node| !node.is_empty())
        .map(str::to_string)
        .collect()
}

/// Apply environment variable configuration to the loader.
///
/// Only fields that are still unset are filled.
pub fn apply_env(loader: &mut ClusterConfigLoader) -> Result<(), ConfigError> {
    loader.fill_name(env_var_or_none(ENV_CLUSTER_NAME));

    if let Some(nodes) = env_var_or_none(ENV_NODES) {
        let nodes = parse_nodes(&nodes);
        if nodes.is_empty() {
            return Err(ConfigError::InvalidValue {
                var: ENV_NODES.to_string(),
                message: "must list at least one node".to_string(),
            });
        }
        loader.fill_endpoints(Some(nodes));
    }

    if let Some(security) = env_var_or_none(ENV_SECURITY_ENABLED) {
        loader.fill_security_enabled(Some(parse_bool(ENV_SECURITY_ENABLED, &security)?));
    }
    if let Some(tls) = env_var_or_none(ENV_TLS_ENABLED) {
        loader.fill_tls_enabled(Some(parse_bool(ENV_TLS_ENABLED, &tls)?));
    }

    loader.fill_ca_certificate_path(env_var_or_none(ENV_CA_CERT).map(PathBuf::from));
    loader.fill_admin_username(env_var_or_none(ENV_ADMIN_USERNAME));
    loader.fill_admin_password(
        env_var_or_none(ENV_ADMIN_PASSWORD).map(|p| SecretString::new(p.into())),
    );

    // Config path from environment (only if not already set via CLI)
    if loader.config_path().is_none()
        && let Some(config_path) = env_var_or_none(ENV_CONFIG_PATH)
    {
        loader.set_config_path(Some(PathBuf::from(config_path)));
    }

    Ok(())
}
