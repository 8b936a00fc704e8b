//! Client builder for constructing [`SearchClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Translating a [`ConnectionProfile`] into HTTP client settings
//! - Configuring the underlying HTTP client (timeouts, redirects, TLS trust, client identity)
//!
//! # What this module does NOT handle:
//! - Choosing credentials or TLS policy (handled by [`crate::profile::ProfileBuilder`])
//! - Sharing clients between callers (handled by [`crate::registry::ClientRegistry`])
//!
//! # Invariants
//! - At least one endpoint is required before calling `build()`
//! - A pinned CA replaces the built-in roots; it is never merged with them
//! - `TlsValidation::AllowAll` is always logged at warn level when a client is built with it

use std::path::{Path, PathBuf};
use std::time::Duration;

use esharness_config::constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS};
use secrecy::SecretString;
use url::Url;

use crate::client::SearchClient;
use crate::error::{ClientError, Result};
use crate::profile::{Authentication, ConnectionProfile, TlsValidation};
use crate::tls::CaBundle;

/// Builder for creating a new [`SearchClient`].
///
/// # Example
///
/// ```rust,ignore
/// use esharness_client::{ProfileBuilder, EnvironmentSignals, Identity, SearchClient};
///
/// let profile = ProfileBuilder::new(&EnvironmentSignals::detect()).build(&cluster, &Identity)?;
/// let client = SearchClient::builder().from_profile(&profile).build()?;
/// ```
#[derive(Debug)]
pub struct SearchClientBuilder {
    endpoints: Vec<Url>,
    credentials: Option<(String, SecretString)>,
    identity_path: Option<PathBuf>,
    tls: Option<TlsValidation>,
    timeout: Duration,
}

impl Default for SearchClientBuilder {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            credentials: None,
            identity_path: None,
            tls: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SearchClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the node URLs.
    pub fn endpoints(mut self, endpoints: Vec<Url>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Send basic credentials with every request.
    pub fn basic_auth(mut self, username: impl Into<String>, password: SecretString) -> Self {
        self.credentials = Some((username.into(), password));
        self
    }

    /// Present the PEM identity (certificate and private key) at `path`.
    pub fn client_identity(mut self, path: impl Into<PathBuf>) -> Self {
        self.identity_path = Some(path.into());
        self
    }

    /// Set how server certificates are validated.
    ///
    /// Without a policy the HTTP client's built-in roots are used.
    pub fn tls(mut self, validation: TlsValidation) -> Self {
        self.tls = Some(validation);
        self
    }

    /// Set the request timeout.
    ///
    /// Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the builder from a resolved connection profile.
    ///
    /// Unset policies stay unset; the profile's provenance does not affect
    /// the resulting client.
    pub fn from_profile(mut self, profile: &ConnectionProfile) -> Self {
        self.endpoints = profile.endpoints.clone();
        self.timeout = profile.request_timeout;
        self.credentials = None;
        self.identity_path = None;

        match profile.auth.value() {
            Some(Authentication::Basic { username, password }) => {
                self.credentials = Some((username.clone(), password.clone()));
            }
            Some(Authentication::ClientCertificate { identity_path }) => {
                self.identity_path = Some(identity_path.clone());
            }
            None => {}
        }

        self.tls = profile.tls.value().cloned();
        self
    }

    /// Build the [`SearchClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if no endpoint was provided,
    /// [`ClientError::CertificateLoad`] if a pinned certificate is rejected,
    /// [`ClientError::IdentityLoad`] if the client identity cannot be read or
    /// parsed, and [`ClientError::HttpError`] if the HTTP client fails to build.
    pub fn build(self) -> Result<SearchClient> {
        if self.endpoints.is_empty() {
            return Err(ClientError::InvalidEndpoint {
                endpoint: String::new(),
                reason: "at least one endpoint is required".to_string(),
            });
        }

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        match &self.tls {
            None | Some(TlsValidation::SystemRoots) => {}
            Some(TlsValidation::CaPinned(bundle)) => {
                http_builder = http_builder.tls_certs_only(pinned_roots(bundle)?);
            }
            Some(TlsValidation::AllowAll) => {
                tracing::warn!(
                    endpoints = ?self.endpoints.iter().map(Url::as_str).collect::<Vec<_>>(),
                    "Building client that accepts any server certificate"
                );
                http_builder = http_builder.danger_accept_invalid_certs(true);
            }
        }

        if let Some(path) = &self.identity_path {
            http_builder = http_builder.identity(load_identity(path)?);
        }

        if self.tls.is_some() && self.endpoints.iter().all(|e| e.scheme() == "http") {
            tracing::warn!(
                "TLS validation policy has no effect on HTTP URLs. It only applies to HTTPS connections."
            );
        }

        let http = http_builder.build()?;

        Ok(SearchClient {
            http,
            endpoints: self.endpoints,
            credentials: self.credentials,
        })
    }
}

/// Convert the bundle into the only roots the client will trust.
fn pinned_roots(bundle: &CaBundle) -> Result<Vec<reqwest::Certificate>> {
    bundle
        .certificates()
        .iter()
        .map(|der| {
            reqwest::Certificate::from_der(der).map_err(|e| ClientError::CertificateLoad {
                path: bundle.path().to_path_buf(),
                reason: e.to_string(),
            })
        })
        .collect()
}

fn load_identity(path: &Path) -> Result<reqwest::Identity> {
    let identity_load = |reason: String| ClientError::IdentityLoad {
        path: path.to_path_buf(),
        reason,
    };
    let pem = std::fs::read(path).map_err(|e| identity_load(e.to_string()))?;
    reqwest::Identity::from_pem(&pem).map_err(|e| identity_load(e.to_string()))
}
