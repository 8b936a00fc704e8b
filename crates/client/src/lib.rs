//! Client plumbing for integration tests against search clusters.
//!
//! This crate turns a [`ClusterConfiguration`](esharness_config::ClusterConfiguration)
//! into a connection profile (endpoints, authentication, TLS policy), and hands
//! out one shared [`SearchClient`] per key for the lifetime of a test session.
//! Local debugging proxies are detected once and reflected in the endpoint host.

pub mod cache;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod profile;
pub mod registry;
pub mod tls;

pub use cache::{ClientCache, ClientKey};
pub use client::{SearchClient, SearchClientBuilder};
pub use endpoint::{EndpointResolver, EnvironmentSignals, ProcessInspector, SystemProcessInspector};
pub use error::{ClientError, Result};
pub use models::{ClusterInfo, VersionInfo};
pub use profile::{
    Authentication, ConnectionProfile, Identity, PolicySummary, ProfileBuilder,
    ProfileFingerprint, ProfileOverride, ProfileOverrides, ProfileSummary, Setting, TlsValidation,
};
pub use registry::ClientRegistry;
pub use tls::CaBundle;
