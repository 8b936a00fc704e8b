//! Cluster configuration types for esharness.
//!
//! Responsibilities:
//! - Define `ClusterConfiguration`, the description of a target deployment.
//! - Provide convenience constructors for common cluster shapes.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Endpoint rewriting, credential or TLS policy (see client crate).
//!
//! Invariants:
//! - A `ClusterConfiguration` is read-only once built; the client crate never mutates it.
//! - `ClusterConfiguration::default()` describes an unsecured single node on localhost.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CLUSTER_NAME, DEFAULT_NODE_PORT, LOOPBACK_HOST};
use crate::types::auth::AdminCredentials;

/// Description of a search backend deployment.
///
/// Created once per test session by whatever manages the cluster lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfiguration {
    /// Cluster identity, used as the default client cache key.
    #[serde(default = "default_cluster_name")]
    pub name: String,
    /// Node endpoints, either `host[:port]` or a full URI.
    pub endpoints: Vec<String>,
    /// Whether the cluster requires authentication.
    #[serde(default)]
    pub security_enabled: bool,
    /// Whether the cluster serves HTTPS.
    #[serde(default)]
    pub tls_enabled: bool,
    /// PEM-encoded CA certificate that signed the node certificates.
    #[serde(default)]
    pub ca_certificate_path: Option<PathBuf>,
    /// Administrative credentials provisioned on the cluster.
    #[serde(default)]
    pub admin: AdminCredentials,
}

fn default_cluster_name() -> String {
    DEFAULT_CLUSTER_NAME.to_string()
}

impl Default for ClusterConfiguration {
    fn default() -> Self {
        Self {
            name: default_cluster_name(),
            endpoints: vec![format!("{}:{}", LOOPBACK_HOST, DEFAULT_NODE_PORT)],
            security_enabled: false,
            tls_enabled: false,
            ca_certificate_path: None,
            admin: AdminCredentials::default(),
        }
    }
}

impl ClusterConfiguration {
    /// Create an unsecured cluster description for the given nodes.
    pub fn new(name: impl Into<String>, endpoints: Vec<String>) -> Self {
        Self {
            name: name.into(),
            endpoints,
            ..Self::default()
        }
    }

    /// Enable authentication with the given administrative credentials.
    pub fn with_security(mut self, admin: AdminCredentials) -> Self {
        self.security_enabled = true;
        self.admin = admin;
        self
    }

    /// Enable HTTPS, trusting the CA certificate at `ca_certificate_path`.
    pub fn with_tls(mut self, ca_certificate_path: impl Into<PathBuf>) -> Self {
        self.tls_enabled = true;
        self.ca_certificate_path = Some(ca_certificate_path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_default_cluster_configuration() {
        let config = ClusterConfiguration::default();
        assert_eq!(config.name, "ephemeral");
        assert_eq!(config.endpoints, vec!["localhost:9200".to_string()]);
        assert!(!config.security_enabled);
        assert!(!config.tls_enabled);
        assert!(config.ca_certificate_path.is_none());
    }

    #[test]
    fn test_with_security_and_tls() {
        let admin = AdminCredentials::new("root", SecretString::new("pw".to_string().into()));
        let config = ClusterConfiguration::new("secure", vec!["node1".to_string()])
            .with_security(admin.clone())
            .with_tls("/tmp/ca.crt");

        assert!(config.security_enabled);
        assert!(config.tls_enabled);
        assert_eq!(config.admin, admin);
        assert_eq!(
            config.ca_certificate_path,
            Some(PathBuf::from("/tmp/ca.crt"))
        );
    }

    #[test]
    fn test_deserialize_minimal_json_uses_defaults() {
        let json = r#"{ "endpoints": ["node1:9201"] }"#;
        let config: ClusterConfiguration = serde_json::from_str(json).unwrap();

        assert_eq!(config.name, "ephemeral");
        assert_eq!(config.endpoints, vec!["node1:9201".to_string()]);
        assert!(!config.security_enabled);
        assert_eq!(config.admin, AdminCredentials::default());
    }

    /// Test that ClusterConfiguration Debug output does not expose the admin password.
    #[test]
    fn test_cluster_configuration_debug_does_not_expose_password() {
        let admin = AdminCredentials::new(
            "root",
            SecretString::new("cluster-secret-123".to_string().into()),
        );
        let config = ClusterConfiguration::default().with_security(admin);

        let debug_output = format!("{:?}", config);

        assert!(!debug_output.contains("cluster-secret-123"));
        assert!(debug_output.contains("localhost:9200"));
    }
}
