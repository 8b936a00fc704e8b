//! Connection profiles: everything needed to construct a client.
//!
//! Responsibilities:
//! - Define `ConnectionProfile` and its authentication / TLS policy slots.
//! - Track where each policy came from with the tri-state `Setting`.
//! - Provide a fingerprint and a printable summary of a profile.
//!
//! Does NOT handle:
//! - Deriving a profile from cluster configuration (see `profile::builder`).
//! - Building HTTP clients from a profile (see `client::builder`).
//!
//! Invariants:
//! - Only overrides produce `Setting::Explicit`; only the builder produces `Setting::Defaulted`.
//! - Secrets never appear in `Debug` or summaries; fingerprints carry them only as a SHA-256 digest.
//! - Profiles that differ in password or pinned CA bytes never share a fingerprint.

mod builder;
mod overrides;

pub use builder::ProfileBuilder;
pub use overrides::{Identity, ProfileOverride, ProfileOverrides};

use std::path::PathBuf;
use std::time::Duration;

use esharness_config::constants::DEFAULT_TIMEOUT_SECS;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sha2::{Digest, Sha256};
use url::Url;

use crate::tls::CaBundle;

/// A policy slot that records whether, and by whom, it was filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Setting<T> {
    /// Nobody has chosen a value.
    #[default]
    Unset,
    /// Chosen by the caller's override; never replaced by the builder.
    Explicit(T),
    /// Filled in by the builder from cluster configuration.
    Defaulted(T),
}

impl<T> Setting<T> {
    /// Return true for `Explicit` and `Defaulted`.
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Return true if the caller chose this value.
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    /// The value, regardless of who chose it.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Unset => None,
            Self::Explicit(value) | Self::Defaulted(value) => Some(value),
        }
    }

    fn source(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Explicit(_) => "explicit",
            Self::Defaulted(_) => "defaulted",
        }
    }
}

/// How the client authenticates to the cluster.
#[derive(Debug, Clone)]
pub enum Authentication {
    /// HTTP basic authentication.
    Basic {
        username: String,
        password: SecretString,
    },
    /// TLS client certificate; the file holds the PEM certificate and key.
    ClientCertificate { identity_path: PathBuf },
}

impl PartialEq for Authentication {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Basic {
                    username: u1,
                    password: p1,
                },
                Self::Basic {
                    username: u2,
                    password: p2,
                },
            ) => u1 == u2 && p1.expose_secret() == p2.expose_secret(),
            (
                Self::ClientCertificate { identity_path: a },
                Self::ClientCertificate { identity_path: b },
            ) => a == b,
            _ => false,
        }
    }
}

impl Eq for Authentication {}

impl Authentication {
    fn describe(&self) -> String {
        match self {
            Self::Basic { username, .. } => format!("basic:{username}"),
            Self::ClientCertificate { identity_path } => {
                format!("certificate:{}", identity_path.display())
            }
        }
    }
}

/// How the client validates the server certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsValidation {
    /// Validate against the platform's trusted roots.
    SystemRoots,
    /// Trust only the given CA certificates.
    CaPinned(CaBundle),
    /// Accept any server certificate. Insecure; test clusters only.
    AllowAll,
}

impl TlsValidation {
    /// Return true if server certificates are not validated.
    pub fn is_insecure(&self) -> bool {
        matches!(self, Self::AllowAll)
    }

    fn describe(&self) -> String {
        match self {
            Self::SystemRoots => "system-roots".to_string(),
            Self::CaPinned(bundle) => format!("ca-pinned:{}", bundle.path().display()),
            Self::AllowAll => "allow-all".to_string(),
        }
    }
}

/// Resolved parameters for constructing a client.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionProfile {
    /// Node URLs, in configuration order.
    pub endpoints: Vec<Url>,
    pub auth: Setting<Authentication>,
    pub tls: Setting<TlsValidation>,
    pub request_timeout: Duration,
}

impl ConnectionProfile {
    /// Profile with the given endpoints and no policy chosen.
    pub fn new(endpoints: Vec<Url>) -> Self {
        Self {
            endpoints,
            auth: Setting::Unset,
            tls: Setting::Unset,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Explicitly use basic authentication.
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: SecretString) -> Self {
        self.auth = Setting::Explicit(Authentication::Basic {
            username: username.into(),
            password,
        });
        self
    }

    /// Explicitly authenticate with a client certificate.
    pub fn with_client_certificate(mut self, identity_path: impl Into<PathBuf>) -> Self {
        self.auth = Setting::Explicit(Authentication::ClientCertificate {
            identity_path: identity_path.into(),
        });
        self
    }

    /// Explicitly choose a TLS validation policy.
    pub fn with_tls(mut self, validation: TlsValidation) -> Self {
        self.tls = Setting::Explicit(validation);
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Structural identity, usable as a cache key.
    ///
    /// The password and the pinned CA certificates enter only through a
    /// SHA-256 digest, so the fingerprint can be logged without exposing them.
    pub fn fingerprint(&self) -> ProfileFingerprint {
        ProfileFingerprint {
            endpoints: self.endpoints.iter().map(Url::to_string).collect(),
            auth: self.auth.value().map(Authentication::describe),
            tls: self.tls.value().map(TlsValidation::describe),
            request_timeout: self.request_timeout,
            material: self.material_digest(),
        }
    }

    /// Digest of the secret and certificate material the description omits.
    fn material_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        if let Some(Authentication::Basic { password, .. }) = self.auth.value() {
            let password = password.expose_secret().as_bytes();
            hasher.update((password.len() as u64).to_be_bytes());
            hasher.update(password);
        }
        if let Some(TlsValidation::CaPinned(bundle)) = self.tls.value() {
            for der in bundle.certificates() {
                hasher.update((der.len() as u64).to_be_bytes());
                hasher.update(der);
            }
        }
        hasher.finalize().into()
    }

    /// Printable, redacted view of the profile.
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            endpoints: self.endpoints.iter().map(Url::to_string).collect(),
            auth: PolicySummary {
                source: self.auth.source(),
                value: self.auth.value().map(Authentication::describe),
            },
            tls: PolicySummary {
                source: self.tls.source(),
                value: self.tls.value().map(TlsValidation::describe),
            },
            request_timeout_secs: self.request_timeout.as_secs(),
        }
    }
}

/// Hashable identity of a [`ConnectionProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileFingerprint {
    endpoints: Vec<String>,
    auth: Option<String>,
    tls: Option<String>,
    request_timeout: Duration,
    material: [u8; 32],
}

/// Redacted profile view for display.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub endpoints: Vec<String>,
    pub auth: PolicySummary,
    pub tls: PolicySummary,
    pub request_timeout_secs: u64,
}

/// One policy slot in a [`ProfileSummary`].
#[derive(Debug, Clone, Serialize)]
pub struct PolicySummary {
    pub source: &'static str,
    pub value: Option<String>,
}
