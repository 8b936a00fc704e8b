//! Cluster configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ClusterConfigLoader` for hierarchical configuration merging.
//! - Support loading from environment variables, JSON files, and direct builder methods.
//! - Validate and build the final `ClusterConfiguration`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - File parsing logic (delegated to file.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods always overwrite; `from_env` and `from_file` only fill unset fields,
//!   so they must be called in priority order (env before file).
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::path::PathBuf;

use super::env::apply_env;
use super::error::ConfigError;
use super::file::apply_file;
use crate::constants::DEFAULT_CLUSTER_NAME;
use crate::types::{AdminCredentials, ClusterConfiguration};

/// Loader that builds a [`ClusterConfiguration`] from layered sources.
#[derive(Debug, Default)]
pub struct ClusterConfigLoader {
    name: Option<String>,
    endpoints: Option<Vec<String>>,
    security_enabled: Option<bool>,
    tls_enabled: Option<bool>,
    ca_certificate_path: Option<PathBuf>,
    admin_username: Option<String>,
    admin_password: Option<SecretString>,
    config_path: Option<PathBuf>,
}

impl ClusterConfigLoader {
    /// Create a new, empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Read configuration from the JSON file set via [`Self::with_config_path`]
    /// or `ESHARNESS_CONFIG_PATH`. Does nothing when no path is known.
    pub fn from_file(mut self) -> Result<Self, ConfigError> {
        apply_file(&mut self)?;
        Ok(self)
    }

    /// Override the config file path.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Set the cluster identity.
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Set the node endpoints.
    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Set whether the cluster requires authentication.
    pub fn with_security_enabled(mut self, enabled: bool) -> Self {
        self.security_enabled = Some(enabled);
        self
    }

    /// Set whether the cluster serves HTTPS.
    pub fn with_tls_enabled(mut self, enabled: bool) -> Self {
        self.tls_enabled = Some(enabled);
        self
    }

    /// Set the CA certificate path.
    pub fn with_ca_certificate_path(mut self, path: PathBuf) -> Self {
        self.ca_certificate_path = Some(path);
        self
    }

    /// Set the administrative username.
    pub fn with_admin_username(mut self, username: String) -> Self {
        self.admin_username = Some(username);
        self
    }

    /// Set the administrative password.
    pub fn with_admin_password(mut self, password: String) -> Self {
        self.admin_password = Some(SecretString::new(password.into()));
        self
    }

    /// Build the final cluster configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEndpoints`] if the endpoint list is empty,
    /// [`ConfigError::InvalidEndpoint`] for blank endpoints, and
    /// [`ConfigError::MissingAdminUsername`] for a blank admin username.
    pub fn build(self) -> Result<ClusterConfiguration, ConfigError> {
        let defaults = ClusterConfiguration::default();

        let endpoints = match self.endpoints {
            Some(endpoints) => Self::validate_endpoints(endpoints)?,
            None => defaults.endpoints,
        };

        let default_admin = AdminCredentials::default();
        let username = self.admin_username.unwrap_or(default_admin.username);
        if username.trim().is_empty() {
            return Err(ConfigError::MissingAdminUsername);
        }
        let password = self.admin_password.unwrap_or(default_admin.password);

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CLUSTER_NAME.to_string());

        let config = ClusterConfiguration {
            name,
            endpoints,
            security_enabled: self.security_enabled.unwrap_or(defaults.security_enabled),
            tls_enabled: self.tls_enabled.unwrap_or(defaults.tls_enabled),
            ca_certificate_path: self.ca_certificate_path,
            admin: AdminCredentials::new(username, password),
        };

        tracing::debug!(
            cluster = %config.name,
            nodes = config.endpoints.len(),
            security = config.security_enabled,
            tls = config.tls_enabled,
            "Loaded cluster configuration"
        );

        Ok(config)
    }

    fn validate_endpoints(endpoints: Vec<String>) -> Result<Vec<String>, ConfigError> {
        if endpoints.is_empty() {
            return Err(ConfigError::MissingEndpoints);
        }
        endpoints
            .into_iter()
            .map(|endpoint| {
                let trimmed = endpoint.trim();
                if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
                    Err(ConfigError::InvalidEndpoint(endpoint))
                } else {
                    Ok(trimmed.to_string())
                }
            })
            .collect()
    }

    // Internal accessors for use by other loader modules

    pub(crate) fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub(crate) fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }

    pub(crate) fn fill_name(&mut self, name: Option<String>) {
        self.name = self.name.take().or(name);
    }

    pub(crate) fn fill_endpoints(&mut self, endpoints: Option<Vec<String>>) {
        self.endpoints = self.endpoints.take().or(endpoints);
    }

    pub(crate) fn fill_security_enabled(&mut self, enabled: Option<bool>) {
        self.security_enabled = self.security_enabled.or(enabled);
    }

    pub(crate) fn fill_tls_enabled(&mut self, enabled: Option<bool>) {
        self.tls_enabled = self.tls_enabled.or(enabled);
    }

    pub(crate) fn fill_ca_certificate_path(&mut self, path: Option<PathBuf>) {
        self.ca_certificate_path = self.ca_certificate_path.take().or(path);
    }

    pub(crate) fn fill_admin_username(&mut self, username: Option<String>) {
        self.admin_username = self.admin_username.take().or(username);
    }

    pub(crate) fn fill_admin_password(&mut self, password: Option<SecretString>) {
        self.admin_password = self.admin_password.take().or(password);
    }
}
