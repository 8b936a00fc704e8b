//! JSON file loading for cluster configuration.
//!
//! Responsibilities:
//! - Read a partial cluster description from a JSON file.
//! - Fill loader fields that no higher-priority source has set.
//!
//! Does NOT handle:
//! - Writing configuration files back to disk.
//!
//! Invariants:
//! - A missing path (none configured) is not an error; an unreadable configured path is.

use secrecy::SecretString;
use serde::Deserialize;
use std::path::PathBuf;

use super::builder::ClusterConfigLoader;
use super::error::ConfigError;

/// On-disk cluster description; every field is optional.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClusterFile {
    name: Option<String>,
    endpoints: Option<Vec<String>>,
    security_enabled: Option<bool>,
    tls_enabled: Option<bool>,
    ca_certificate_path: Option<PathBuf>,
    admin_username: Option<String>,
    admin_password: Option<String>,
}

/// Apply the configured JSON file (if any) to the loader.
pub fn apply_file(loader: &mut ClusterConfigLoader) -> Result<(), ConfigError> {
    let Some(path) = loader.config_path().cloned() else {
        return Ok(());
    };

    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.clone(),
        source,
    })?;
    let file: ClusterFile = serde_json::from_str(&contents)
        .map_err(|source| ConfigError::ConfigFileParse { path: path.clone(), source })?;

    // Relative CA paths are resolved against the config file's directory.
    let ca_certificate_path = file.ca_certificate_path.map(|ca| {
        match path.parent() {
            Some(dir) if ca.is_relative() => dir.join(ca),
            _ => ca,
        }
    });

    loader.fill_name(file.name);
    loader.fill_endpoints(file.endpoints);
    loader.fill_security_enabled(file.security_enabled);
    loader.fill_tls_enabled(file.tls_enabled);
    loader.fill_ca_certificate_path(ca_certificate_path);
    loader.fill_admin_username(file.admin_username);
    loader.fill_admin_password(file.admin_password.map(|p| SecretString::new(p.into())));

    tracing::debug!(path = %path.display(), "Applied cluster configuration file");
    Ok(())
}
