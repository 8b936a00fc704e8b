//! Process-wide client cache.
//!
//! Purpose: Hand out at most one client per key for the lifetime of the cache.
//! Responsibilities: Coalesce concurrent construction for the same key, keep constructed clients.
//! Non-scope: Eviction, expiry, or invalidation; the cache lives as long as its test session.
//! Invariants/Assumptions: Failed constructions are not cached; unrelated keys never wait on each other.
//!
//! Backed by `moka::sync::Cache` without a capacity bound or TTL. moka's
//! `try_get_with` runs the initializer once per key while concurrent callers
//! for that key wait for its result.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use esharness_config::ClusterConfiguration;
use moka::sync::Cache as MokaCache;

use crate::profile::{ConnectionProfile, ProfileFingerprint};

/// Identity under which a client is cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClientKey {
    /// One client per cluster, whatever override was used to build it.
    Cluster(String),
    /// A caller-named client variant for a cluster.
    Named { cluster: String, name: String },
    /// One client per resolved profile.
    Profile(ProfileFingerprint),
}

impl ClientKey {
    /// Key for the default client of `cluster`.
    pub fn cluster(cluster: &ClusterConfiguration) -> Self {
        Self::Cluster(cluster.name.clone())
    }

    /// Key for a named client variant of `cluster`.
    pub fn named(cluster: &ClusterConfiguration, name: impl Into<String>) -> Self {
        Self::Named {
            cluster: cluster.name.clone(),
            name: name.into(),
        }
    }

    /// Key for the structural identity of `profile`.
    pub fn profile(profile: &ConnectionProfile) -> Self {
        Self::Profile(profile.fingerprint())
    }
}

/// Get-or-create cache of shared clients.
pub struct ClientCache<K, C> {
    inner: MokaCache<K, Arc<C>>,
}

impl<K, C> ClientCache<K, C>
where
    K: Hash + Eq + Send + Sync + fmt::Debug + 'static,
    C: Send + Sync + 'static,
{
    /// Create an empty, unbounded cache.
    pub fn new() -> Self {
        Self {
            inner: MokaCache::builder().build(),
        }
    }

    /// Return the client for `key`, constructing it with `init` if absent.
    ///
    /// `init` runs at most once per key; concurrent callers for the same key
    /// block until it finishes and then share its result. If `init` fails the
    /// error is returned to every waiting caller and nothing is cached.
    pub fn get_or_create<F, E>(&self, key: K, init: F) -> Result<Arc<C>, Arc<E>>
    where
        F: FnOnce() -> Result<C, E>,
        E: Send + Sync + 'static,
    {
        let mut constructed = false;
        let key_label = format!("{key:?}");
        let result = self.inner.try_get_with(key, || {
            constructed = true;
            init().map(Arc::new)
        });

        match &result {
            Ok(_) if constructed => tracing::info!(key = %key_label, "Constructed client"),
            Ok(_) => tracing::debug!(key = %key_label, "Client cache hit"),
            Err(_) => tracing::debug!(key = %key_label, "Client construction failed"),
        }
        result
    }

    /// Return the cached client for `key`, if any.
    pub fn get(&self, key: &K) -> Option<Arc<C>> {
        self.inner.get(key)
    }

    /// Return true if a client is cached for `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of cached clients.
    pub fn len(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }

    /// Return true if no client is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, C> Default for ClientCache<K, C>
where
    K: Hash + Eq + Send + Sync + fmt::Debug + 'static,
    C: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> Clone for ClientCache<K, C> {
    /// Clones share the same entries.
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, C> fmt::Debug for ClientCache<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCache")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}
