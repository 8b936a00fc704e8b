//! Caller-supplied profile overrides.
//!
//! An override is a pure transformation of the base profile. The builder
//! applies it exactly once, before filling in any defaults, so anything the
//! override sets takes precedence over cluster configuration.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use super::{ConnectionProfile, TlsValidation};

/// Strategy for adjusting a base profile before defaults are applied.
pub trait ProfileOverride {
    /// Transform the base profile.
    fn apply(&self, profile: ConnectionProfile) -> ConnectionProfile;
}

/// Override that leaves the profile unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl ProfileOverride for Identity {
    fn apply(&self, profile: ConnectionProfile) -> ConnectionProfile {
        profile
    }
}

impl<F> ProfileOverride for F
where
    F: Fn(ConnectionProfile) -> ConnectionProfile,
{
    fn apply(&self, profile: ConnectionProfile) -> ConnectionProfile {
        self(profile)
    }
}

/// Declarative override: every field that is `Some` is set explicitly.
///
/// When both basic credentials and a client certificate are given, the
/// client certificate is used.
#[derive(Debug, Clone, Default)]
pub struct ProfileOverrides {
    credentials: Option<(String, SecretString)>,
    client_certificate: Option<PathBuf>,
    tls: Option<TlsValidation>,
    request_timeout: Option<Duration>,
}

impl ProfileOverrides {
    /// Create an override that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use basic authentication with these credentials.
    pub fn basic_auth(mut self, username: impl Into<String>, password: SecretString) -> Self {
        self.credentials = Some((username.into(), password));
        self
    }

    /// Authenticate with the PEM identity at `path`.
    pub fn client_certificate(mut self, path: impl Into<PathBuf>) -> Self {
        self.client_certificate = Some(path.into());
        self
    }

    /// Use this TLS validation policy.
    pub fn tls(mut self, validation: TlsValidation) -> Self {
        self.tls = Some(validation);
        self
    }

    /// Use this per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

impl ProfileOverride for ProfileOverrides {
    fn apply(&self, mut profile: ConnectionProfile) -> ConnectionProfile {
        if let Some((username, password)) = &self.credentials {
            profile = profile.with_basic_auth(username.clone(), password.clone());
        }
        if let Some(path) = &self.client_certificate {
            profile = profile.with_client_certificate(path.clone());
        }
        if let Some(validation) = &self.tls {
            profile = profile.with_tls(validation.clone());
        }
        if let Some(timeout) = self.request_timeout {
            profile = profile.with_request_timeout(timeout);
        }
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Authentication, Setting};
    use url::Url;

    fn base() -> ConnectionProfile {
        ConnectionProfile::new(vec![Url::parse("http://localhost:9200").unwrap()])
    }

    #[test]
    fn test_identity_leaves_profile_unchanged() {
        assert_eq!(Identity.apply(base()), base());
    }

    #[test]
    fn test_closure_is_an_override() {
        let timeout = |p: ConnectionProfile| p.with_request_timeout(Duration::from_secs(5));
        let profile = timeout.apply(base());
        assert_eq!(profile.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        assert_eq!(ProfileOverrides::new().apply(base()), base());
    }

    #[test]
    fn test_overrides_set_explicit_values() {
        let profile = ProfileOverrides::new()
            .basic_auth("custom", SecretString::new("pw".to_string().into()))
            .tls(TlsValidation::SystemRoots)
            .request_timeout(Duration::from_secs(7))
            .apply(base());

        assert!(matches!(
            profile.auth,
            Setting::Explicit(Authentication::Basic { ref username, .. }) if username == "custom"
        ));
        assert_eq!(profile.tls, Setting::Explicit(TlsValidation::SystemRoots));
        assert_eq!(profile.request_timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_client_certificate_wins_over_credentials() {
        let profile = ProfileOverrides::new()
            .basic_auth("custom", SecretString::new("pw".to_string().into()))
            .client_certificate("/certs/client.pem")
            .apply(base());

        assert!(matches!(
            profile.auth,
            Setting::Explicit(Authentication::ClientCertificate { .. })
        ));
    }
}
