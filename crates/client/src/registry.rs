//! Get-or-add entry point for cluster clients.
//!
//! Responsibilities:
//! - Derive connection profiles for callers that only need the profile.
//! - Return the shared client for a key, deriving the profile and building
//!   the client only when the key is absent.
//!
//! Does NOT handle:
//! - Proxy detection (signals are baked into the `ProfileBuilder`).
//! - Client eviction; clients live as long as the registry.
//!
//! Invariants:
//! - For a given key the profile is derived and the factory invoked at most
//!   once among concurrent callers, and never again after success.
//! - An override passed for a key that is already cached has no effect.

use std::fmt;
use std::sync::Arc;

use esharness_config::ClusterConfiguration;

use crate::cache::{ClientCache, ClientKey};
use crate::client::SearchClient;
use crate::error::{ClientError, Result};
use crate::profile::{ConnectionProfile, ProfileBuilder, ProfileOverride};

/// Shared clients keyed by [`ClientKey`].
pub struct ClientRegistry<C = SearchClient> {
    profiles: ProfileBuilder,
    clients: ClientCache<ClientKey, C>,
}

impl<C> ClientRegistry<C>
where
    C: Send + Sync + 'static,
{
    /// Registry deriving profiles with `profiles`.
    pub fn new(profiles: ProfileBuilder) -> Self {
        Self {
            profiles,
            clients: ClientCache::new(),
        }
    }

    /// The profile builder in use.
    pub fn profile_builder(&self) -> &ProfileBuilder {
        &self.profiles
    }

    /// Derive the connection profile for `cluster` without touching the cache.
    pub fn connection_profile<O>(
        &self,
        cluster: &ClusterConfiguration,
        profile_override: &O,
    ) -> Result<ConnectionProfile>
    where
        O: ProfileOverride + ?Sized,
    {
        self.profiles.build(cluster, profile_override)
    }

    /// Return the client cached under `key`, building it if absent.
    ///
    /// On a miss the profile for `cluster` is derived with `profile_override`
    /// and handed to `factory`. Concurrent callers for the same key wait for
    /// that single construction and share its outcome.
    ///
    /// # Errors
    ///
    /// Profile or factory failures are returned as [`ClientError::Shared`]
    /// and are not cached; a later call retries.
    pub fn get_or_add_client_with<O, F>(
        &self,
        key: ClientKey,
        cluster: &ClusterConfiguration,
        profile_override: &O,
        factory: F,
    ) -> Result<Arc<C>>
    where
        O: ProfileOverride + ?Sized,
        F: FnOnce(&ConnectionProfile) -> Result<C>,
    {
        self.clients
            .get_or_create(key, || {
                let profile = self.profiles.build(cluster, profile_override)?;
                factory(&profile)
            })
            .map_err(ClientError::from)
    }

    /// Return the cached client for `key`, if any.
    pub fn get(&self, key: &ClientKey) -> Option<Arc<C>> {
        self.clients.get(key)
    }

    /// Number of cached clients.
    pub fn len(&self) -> u64 {
        self.clients.len()
    }

    /// Return true if no client is cached.
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl ClientRegistry<SearchClient> {
    /// Return the default client for `cluster`, building it if absent.
    ///
    /// Keyed by cluster name: once a client exists for the cluster, later
    /// calls return it whatever override they pass.
    pub fn get_or_add_client<O>(
        &self,
        cluster: &ClusterConfiguration,
        profile_override: &O,
    ) -> Result<Arc<SearchClient>>
    where
        O: ProfileOverride + ?Sized,
    {
        self.get_or_add_client_with(
            ClientKey::cluster(cluster),
            cluster,
            profile_override,
            |profile| SearchClient::builder().from_profile(profile).build(),
        )
    }
}

impl<C> fmt::Debug for ClientRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientRegistry")
            .field("profiles", &self.profiles)
            .field("clients", &self.clients)
            .finish()
    }
}
