//! Derives connection profiles from cluster configuration.
//!
//! Responsibilities:
//! - Rewrite node endpoints onto the resolved host.
//! - Apply the caller's override exactly once.
//! - Fill unset authentication and TLS policy from cluster configuration.
//!
//! Does NOT handle:
//! - Proxy detection (see `endpoint` module; signals are passed in).
//! - Caching of profiles or clients (see `cache` and `registry`).
//!
//! Invariants:
//! - A policy the override set is never replaced.
//! - Credentials are defaulted only when security is enabled; TLS policy only when TLS is enabled.
//! - The CA file is read only when TLS is enabled and the override left TLS unset.

use esharness_config::ClusterConfiguration;

use super::{Authentication, ConnectionProfile, ProfileOverride, Setting, TlsValidation};
use crate::endpoint::{EndpointResolver, EnvironmentSignals};
use crate::error::Result;
use crate::tls::CaBundle;

/// Builds [`ConnectionProfile`]s for cluster configurations.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    resolver: EndpointResolver,
    insecure_allow_all: bool,
}

impl ProfileBuilder {
    /// Builder targeting the host chosen by `signals`.
    pub fn new(signals: &EnvironmentSignals) -> Self {
        Self::with_resolver(EndpointResolver::from_signals(signals))
    }

    /// Builder using an explicit endpoint resolver.
    pub fn with_resolver(resolver: EndpointResolver) -> Self {
        Self {
            resolver,
            insecure_allow_all: false,
        }
    }

    /// Default to accepting any server certificate instead of pinning the cluster CA.
    ///
    /// # Security Warning
    /// Only for test clusters whose certificates cannot be validated. The CA
    /// file is still loaded and must be valid.
    pub fn insecure_allow_all(mut self) -> Self {
        self.insecure_allow_all = true;
        self
    }

    /// Return true if the insecure TLS default is enabled.
    pub fn is_insecure(&self) -> bool {
        self.insecure_allow_all
    }

    /// The endpoint resolver in use.
    pub fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }

    /// Derive the connection profile for `cluster`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::InvalidEndpoint`] for an endpoint that
    /// cannot be parsed, and [`crate::ClientError::CertificateLoad`] if TLS
    /// policy must be defaulted and the CA file is missing or malformed.
    pub fn build<O>(
        &self,
        cluster: &ClusterConfiguration,
        profile_override: &O,
    ) -> Result<ConnectionProfile>
    where
        O: ProfileOverride + ?Sized,
    {
        let endpoints = self
            .resolver
            .rewrite_all(&cluster.endpoints, cluster.tls_enabled)?;
        let mut profile = profile_override.apply(ConnectionProfile::new(endpoints));

        if !profile.auth.is_set() && cluster.security_enabled {
            profile.auth = Setting::Defaulted(Authentication::Basic {
                username: cluster.admin.username.clone(),
                password: cluster.admin.password.clone(),
            });
        }

        if !profile.tls.is_set() && cluster.tls_enabled {
            profile.tls = Setting::Defaulted(self.default_tls(cluster)?);
        }

        tracing::debug!(
            cluster = %cluster.name,
            host = %self.resolver.host(),
            auth = ?profile.auth.is_set(),
            tls = ?profile.tls.value().map(TlsValidation::is_insecure),
            "Resolved connection profile"
        );

        Ok(profile)
    }

    fn default_tls(&self, cluster: &ClusterConfiguration) -> Result<TlsValidation> {
        let Some(path) = &cluster.ca_certificate_path else {
            tracing::warn!(
                cluster = %cluster.name,
                "TLS is enabled but no CA certificate is configured; validating against system roots"
            );
            return Ok(TlsValidation::SystemRoots);
        };

        let bundle = CaBundle::load(path)?;
        if self.insecure_allow_all {
            tracing::warn!(
                cluster = %cluster.name,
                "Server certificate validation is disabled (insecure test mode)"
            );
            Ok(TlsValidation::AllowAll)
        } else {
            Ok(TlsValidation::CaPinned(bundle))
        }
    }
}
