//! Centralized constants for the esharness workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Cluster Defaults
// =============================================================================

/// Default cluster identity when none is configured.
pub const DEFAULT_CLUSTER_NAME: &str = "ephemeral";

/// Default search backend HTTP port.
pub const DEFAULT_NODE_PORT: u16 = 9200;

/// Administrative username provisioned on secured ephemeral clusters.
pub const DEFAULT_ADMIN_USERNAME: &str = "es_admin";

/// Administrative password provisioned on secured ephemeral clusters.
pub const DEFAULT_ADMIN_PASSWORD: &str = "es_admin";

// =============================================================================
// Endpoint Resolution
// =============================================================================

/// Host targeted when no intercepting proxy is running.
pub const LOOPBACK_HOST: &str = "localhost";

/// Host targeted when an intercepting proxy is running.
///
/// The proxy maps this name back to the loopback interface, which lets it
/// observe traffic that would otherwise bypass it.
pub const PROXY_ROUTING_HOST: &str = "ipv4.fiddler";

/// Process name of the mitmproxy intercepting proxy.
pub const MITMPROXY_PROCESS: &str = "mitmproxy";

/// Process name of the Fiddler intercepting proxy.
pub const FIDDLER_PROCESS: &str = "fiddler";

/// Every process name that switches resolution to [`PROXY_ROUTING_HOST`].
pub const PROXY_PROCESS_NAMES: [&str; 2] = [MITMPROXY_PROCESS, FIDDLER_PROCESS];

// =============================================================================
// Client Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Environment Variables
// =============================================================================

/// Cluster identity (client cache key).
pub const ENV_CLUSTER_NAME: &str = "ESHARNESS_CLUSTER_NAME";

/// Comma-separated node endpoints.
pub const ENV_NODES: &str = "ESHARNESS_NODES";

/// Whether the cluster requires authentication.
pub const ENV_SECURITY_ENABLED: &str = "ESHARNESS_SECURITY_ENABLED";

/// Whether the cluster serves HTTPS.
pub const ENV_TLS_ENABLED: &str = "ESHARNESS_TLS_ENABLED";

/// Path to the PEM-encoded CA certificate of the cluster.
pub const ENV_CA_CERT: &str = "ESHARNESS_CA_CERT";

/// Administrative username override.
pub const ENV_ADMIN_USERNAME: &str = "ESHARNESS_ADMIN_USERNAME";

/// Administrative password override.
pub const ENV_ADMIN_PASSWORD: &str = "ESHARNESS_ADMIN_PASSWORD";

/// Path to a JSON cluster configuration file.
pub const ENV_CONFIG_PATH: &str = "ESHARNESS_CONFIG_PATH";
