//! Cache Configuration Module
//!
//! Two ways to describe a cache:
//!
//! - [`CacheConfig`]: a plain struct with public fields, passed to
//!   [`Cache::init`](crate::Cache::init).
//! - [`CacheBuilder`]: a fluent layer over the same fields, obtained from
//!   [`Cache::builder`](crate::Cache::builder).
//!
//! | Field | Required | Default |
//! |-------|----------|---------|
//! | `capacity` | yes | none, must be positive |
//! | `eviction_policy` | no | [`EvictionPolicyKind::Recency`] |
//! | `eviction_listener` | no | `None` |
//!
//! A zero capacity is rejected with [`ConfigError::ZeroCapacity`] when the
//! cache is built; no cache is produced.
//!
//! # Examples
//!
//! ```
//! use bounded_cache::config::CacheConfig;
//! use bounded_cache::policy::EvictionPolicyKind;
//! use bounded_cache::Cache;
//!
//! let config = CacheConfig {
//!     capacity: 1000,
//!     eviction_policy: EvictionPolicyKind::InsertionOrder,
//!     eviction_listener: None,
//! };
//! let cache: Cache<String, i32> = Cache::init(config, None).unwrap();
//! assert_eq!(cache.capacity(), 1000);
//! assert_eq!(cache.policy_name(), "FIFO");
//! ```

use crate::cache::{Cache, DefaultHashBuilder};
use crate::error::ConfigError;
use crate::listener::EvictionListener;
use crate::policy::EvictionPolicyKind;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

/// Configuration for a [`Cache`].
///
/// # Fields
///
/// - `capacity`: maximum number of entries. Must be positive.
/// - `eviction_policy`: how eviction order is maintained.
/// - `eviction_listener`: optional callback for capacity evictions. See
///   [`EvictionListener`] for the re-entrancy rules.
pub struct CacheConfig<K, V> {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
    /// Ordering policy; fixed for the lifetime of the cache.
    pub eviction_policy: EvictionPolicyKind,
    /// Callback invoked for every capacity-driven eviction.
    pub eviction_listener: Option<EvictionListener<K, V>>,
}

impl<K, V> CacheConfig<K, V> {
    /// Creates a configuration with the given capacity, the recency policy
    /// and no listener.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            eviction_policy: EvictionPolicyKind::default(),
            eviction_listener: None,
        }
    }

    /// Checks the configuration, returning the validated capacity.
    pub fn validate(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.capacity).ok_or(ConfigError::ZeroCapacity)
    }
}

impl<K, V> fmt::Debug for CacheConfig<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("capacity", &self.capacity)
            .field("eviction_policy", &self.eviction_policy)
            .field("eviction_listener", &self.eviction_listener.is_some())
            .finish()
    }
}

/// Fluent builder for a [`Cache`].
///
/// # Examples
///
/// ```
/// use bounded_cache::policy::EvictionPolicyKind;
/// use bounded_cache::Cache;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let evicted = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&evicted);
///
/// let cache = Cache::builder(2)
///     .eviction_policy(EvictionPolicyKind::InsertionOrder)
///     .on_eviction(move |_key: u32, _value: u32| {
///         counter.fetch_add(1, Ordering::Relaxed);
///     })
///     .build()
///     .unwrap();
///
/// for i in 0..5 {
///     cache.put(i, i);
/// }
/// assert_eq!(evicted.load(Ordering::Relaxed), 3);
/// ```
pub struct CacheBuilder<K, V> {
    config: CacheConfig<K, V>,
}

impl<K, V> CacheBuilder<K, V> {
    /// Starts a builder for a cache holding at most `capacity` entries.
    ///
    /// The capacity is validated by [`build`](Self::build).
    pub fn new(capacity: usize) -> Self {
        Self {
            config: CacheConfig::new(capacity),
        }
    }

    /// Sets the eviction policy.
    #[must_use]
    pub fn eviction_policy(mut self, policy: EvictionPolicyKind) -> Self {
        self.config.eviction_policy = policy;
        self
    }

    /// Installs an eviction listener, replacing any previous one.
    #[must_use]
    pub fn eviction_listener(mut self, listener: EvictionListener<K, V>) -> Self {
        self.config.eviction_listener = Some(listener);
        self
    }

    /// Installs a closure as the eviction listener.
    #[must_use]
    pub fn on_eviction<F>(self, callback: F) -> Self
    where
        F: Fn(K, V) + Send + Sync + 'static,
    {
        self.eviction_listener(EvictionListener::new(callback))
    }

    /// Returns the configuration built so far.
    pub fn into_config(self) -> CacheConfig<K, V> {
        self.config
    }
}

impl<K: Hash + Eq, V> CacheBuilder<K, V> {
    /// Builds the cache with the default hasher.
    pub fn build(self) -> Result<Cache<K, V, DefaultHashBuilder>, ConfigError> {
        Cache::init(self.config, None)
    }

    /// Builds the cache with a custom hash builder.
    pub fn build_with_hasher<S: BuildHasher>(
        self,
        hash_builder: S,
    ) -> Result<Cache<K, V, S>, ConfigError> {
        Cache::init_with_hasher(self.config, hash_builder)
    }
}

impl<K, V> fmt::Debug for CacheBuilder<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheBuilder")
            .field("config", &self.config)
            .finish()
    }
}
