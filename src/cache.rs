//! Thread-safe bounded cache.
//!
//! [`Cache`] composes a key map (key -> [`SlotId`]), an ordered index
//! ([`List`]) and an [`EvictionPolicyKind`] behind one
//! `parking_lot::RwLock`, plus an optional [`EvictionListener`].
//!
//! ```text
//!   ┌──────────────────────── RwLock ─────────────────────────┐
//!   │  map: K ──▶ SlotId                                      │
//!   │                                                         │
//!   │  list: HEAD ⇄ [most valuable] ⇄ ... ⇄ [candidate] ⇄ TAIL│
//!   │                                                         │
//!   │  metrics                                                │
//!   └─────────────────────────────────────────────────────────┘
//!   capacity, policy, listener  (immutable after construction)
//! ```
//!
//! # Locking
//!
//! | Operation | Lock |
//! |-----------|------|
//! | `get`, `get_with`, `put`, `remove`, `clear` | write |
//! | `len`, `is_empty`, `contains_key`, `peek`, `keys`, `metrics` | read |
//! | `capacity`, `policy`, `policy_name` | none |
//!
//! `get` takes the write lock under both policies. Under the recency policy a
//! hit reorders the list, and the hit counters change under either policy.
//!
//! Operations are linearizable: every call observes the effects of all calls
//! that acquired the lock before it. Contention blocks; nothing times out.
//!
//! # Eviction
//!
//! A `put` of a new key into a full cache first detaches the policy's
//! candidate from both the map and the list, then hands the owned pair to the
//! listener (still under the write lock), then inserts the new entry at the
//! front.

use crate::config::{CacheBuilder, CacheConfig};
use crate::entry::CacheEntry;
use crate::error::ConfigError;
use crate::list::{List, SlotId};
use crate::listener::EvictionListener;
use crate::metrics::{CacheMetrics, CoreCacheMetrics};
use crate::policy::{EvictionPolicy, EvictionPolicyKind};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use core::sync::atomic::{AtomicUsize, Ordering};
use log::{debug, trace};
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[cfg(feature = "hashbrown")]
pub use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
pub use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Lock-protected state: both indices and the counters.
///
/// Invariant: `map.len() == list.len()`, and every `SlotId` in `map` names a
/// live list node whose entry carries the same key. The owning [`Cache`]
/// keeps the capacity and passes its policy into every call that touches the
/// order.
struct CacheSegment<K, V, S> {
    list: List<CacheEntry<K, V>>,
    map: HashMap<K, SlotId, S>,
    metrics: CoreCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheSegment<K, V, S> {
    fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        CacheSegment {
            list: List::with_capacity(cap.get()),
            map: HashMap::with_capacity_and_hasher(cap.get(), hash_builder),
            metrics: CoreCacheMetrics::new(),
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    fn get<Q>(&mut self, policy: EvictionPolicyKind, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(id) => {
                policy.record_access(&mut self.list, id);
                self.metrics.record_hit();
                self.list.get(id).map(|entry| &entry.value)
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.map.get(key)?;
        self.list.get(*id).map(|entry| &entry.value)
    }

    #[inline]
    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Replaces the value of a present key and records the access. Hands the
    /// value back if `key` is absent.
    fn update(&mut self, policy: EvictionPolicyKind, key: &K, value: V) -> Result<(), V> {
        let Some(&id) = self.map.get(key) else {
            return Err(value);
        };
        if let Some(entry) = self.list.get_mut(id) {
            entry.replace_value(value);
        }
        policy.record_access(&mut self.list, id);
        self.metrics.record_update();
        Ok(())
    }

    /// Places a new key at the front. The caller has made room.
    fn insert(&mut self, policy: EvictionPolicyKind, key: K, value: V)
    where
        K: Clone,
    {
        let id = policy.record_insertion(&mut self.list, CacheEntry::new(key.clone(), value));
        self.map.insert(key, id);
        self.metrics.record_insertion();
    }

    /// Detaches the eviction candidate from both indices.
    fn evict(&mut self, policy: EvictionPolicyKind) -> Option<(K, V)> {
        let id = policy.eviction_candidate(&self.list)?;
        let entry = policy.remove(&mut self.list, id)?;
        self.map.remove(&entry.key);
        self.metrics.record_eviction();
        Some(entry.into_parts())
    }

    fn remove<Q>(&mut self, policy: EvictionPolicyKind, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.map.remove(key)?;
        let entry = policy.remove(&mut self.list, id)?;
        self.metrics.record_removal();
        Some(entry.value)
    }

    fn clear(&mut self, policy: EvictionPolicyKind) -> usize {
        let dropped = self.map.len();
        self.map.clear();
        policy.clear(&mut self.list);
        self.metrics.record_clear();
        dropped
    }

    fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.list.iter().map(|entry| entry.key.clone()).collect()
    }
}

/// A fixed-capacity, thread-safe key/value cache.
///
/// The cache holds at most [`capacity`](Self::capacity) entries. Inserting a
/// new key into a full cache evicts the entry the installed
/// [`EvictionPolicyKind`] designates and reports it to the
/// [`EvictionListener`], if one is installed. Every operation is O(1) except
/// `clear` and `keys`, which are O(n).
///
/// All methods take `&self`; share the cache between threads with `Arc`.
///
/// # Examples
///
/// ```
/// use bounded_cache::Cache;
///
/// let cache = Cache::new(2).unwrap();
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(1));
/// assert_eq!(cache.get(&"cherry"), Some(3));
/// ```
///
/// # Re-entrancy
///
/// The eviction listener runs while the write lock is held. Calling back into
/// the same cache from the listener panics instead of deadlocking.
pub struct Cache<K, V, S = DefaultHashBuilder> {
    capacity: NonZeroUsize,
    policy: EvictionPolicyKind,
    segment: RwLock<CacheSegment<K, V, S>>,
    listener: Option<EvictionListener<K, V>>,
    /// Token of the thread currently running the listener, 0 when idle.
    notifying: AtomicUsize,
}

impl<K: Hash + Eq, V> Cache<K, V, DefaultHashBuilder> {
    /// Creates a recency (LRU) cache with the given capacity and no listener.
    ///
    /// Fails with [`ConfigError::ZeroCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::init(CacheConfig::new(capacity), None)
    }

    /// Creates a cache with the given capacity and policy and no listener.
    pub fn with_policy(capacity: usize, policy: EvictionPolicyKind) -> Result<Self, ConfigError> {
        let mut config = CacheConfig::new(capacity);
        config.eviction_policy = policy;
        Self::init(config, None)
    }

    /// Creates a cache from a configuration with an optional hasher.
    ///
    /// # Arguments
    ///
    /// * `config` - Capacity, policy and listener
    /// * `hasher` - Optional hash builder. If `None`, uses `DefaultHashBuilder`
    pub fn init(
        config: CacheConfig<K, V>,
        hasher: Option<DefaultHashBuilder>,
    ) -> Result<Self, ConfigError> {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K, V> Cache<K, V> {
    /// Starts a [`CacheBuilder`] for a cache of the given capacity.
    pub fn builder(capacity: usize) -> CacheBuilder<K, V> {
        CacheBuilder::new(capacity)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Cache<K, V, S> {
    /// Creates a cache from a configuration with a custom hash builder.
    pub fn init_with_hasher(config: CacheConfig<K, V>, hash_builder: S) -> Result<Self, ConfigError> {
        let capacity = config.validate()?;
        let policy = config.eviction_policy;
        debug!(
            "creating cache: capacity={} policy={} listener={}",
            capacity,
            policy,
            config.eviction_listener.is_some()
        );
        Ok(Self {
            capacity,
            policy,
            segment: RwLock::new(CacheSegment::with_hasher(capacity, hash_builder)),
            listener: config.eviction_listener,
            notifying: AtomicUsize::new(0),
        })
    }

    /// Returns the fixed capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the installed eviction policy.
    #[inline]
    pub fn policy(&self) -> EvictionPolicyKind {
        self.policy
    }

    /// Returns the installed policy's name, `"LRU"` or `"FIFO"`.
    #[inline]
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.check_reentrancy();
        self.segment.read().len()
    }

    /// Returns the number of entries. Same as [`len`](Self::len).
    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a clone of the value for `key`, recording an access.
    ///
    /// Under the recency policy the entry moves to the front of the eviction
    /// order.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.get_with(key, V::clone)
    }

    /// Applies `f` to the value for `key` while holding the lock, recording
    /// an access.
    ///
    /// Use this instead of [`get`](Self::get) to avoid cloning. `f` runs
    /// inside the critical section and must not touch this cache.
    ///
    /// ```
    /// use bounded_cache::Cache;
    ///
    /// let cache = Cache::new(4).unwrap();
    /// cache.put("greeting", String::from("hello"));
    /// assert_eq!(cache.get_with(&"greeting", |s| s.len()), Some(5));
    /// ```
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.check_reentrancy();
        let mut segment = self.segment.write();
        segment.get(self.policy, key).map(f)
    }

    /// Returns a clone of the value for `key` without recording an access.
    ///
    /// Never changes the eviction order or the hit/miss counters.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.check_reentrancy();
        self.segment.read().peek(key).cloned()
    }

    /// Returns `true` if `key` is present.
    ///
    /// Never changes the eviction order, under either policy.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.check_reentrancy();
        self.segment.read().contains_key(key)
    }

    /// Inserts or updates an entry.
    ///
    /// If `key` is present its value is replaced and the access is recorded
    /// (moving it to the front under the recency policy). If `key` is new and
    /// the cache is full, the eviction candidate is removed and passed to the
    /// listener before the new entry is inserted. If the listener panics, the
    /// new entry is not inserted.
    pub fn put(&self, key: K, value: V)
    where
        K: Clone,
    {
        self.check_reentrancy();
        let mut segment = self.segment.write();
        let value = match segment.update(self.policy, &key, value) {
            Ok(()) => return,
            Err(value) => value,
        };

        if segment.len() >= self.capacity.get() {
            if let Some((evicted_key, evicted_value)) = segment.evict(self.policy) {
                trace!(
                    "evicted entry: policy={} len={}",
                    self.policy,
                    segment.len()
                );
                if let Some(listener) = &self.listener {
                    let _notifying = NotifyGuard::enter(&self.notifying);
                    listener.on_eviction(evicted_key, evicted_value);
                }
            }
        }

        segment.insert(self.policy, key, value);
    }

    /// Removes `key`, returning its value.
    ///
    /// Explicit removal never notifies the eviction listener.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.check_reentrancy();
        self.segment.write().remove(self.policy, key)
    }

    /// Removes every entry. Capacity and policy are unchanged, and the
    /// eviction listener is not notified.
    pub fn clear(&self) {
        self.check_reentrancy();
        let dropped = self.segment.write().clear(self.policy);
        debug!("cleared cache: dropped {} entries", dropped);
    }

    /// Returns the keys in eviction order: the most valuable entry first and
    /// the next eviction candidate last.
    ///
    /// ```
    /// use bounded_cache::Cache;
    ///
    /// let cache = Cache::new(3).unwrap();
    /// cache.put('a', 1);
    /// cache.put('b', 2);
    /// cache.get(&'a');
    /// assert_eq!(cache.keys(), vec!['a', 'b']);
    /// ```
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.check_reentrancy();
        self.segment.read().keys()
    }
}

impl<K, V, S> Cache<K, V, S> {
    /// Panics if the current thread is running this cache's eviction
    /// listener; taking the lock again would deadlock.
    #[inline]
    fn check_reentrancy(&self) {
        let notifying = self.notifying.load(Ordering::Acquire);
        if notifying != 0 && notifying == thread_token() {
            panic!("re-entrant cache call from inside its eviction listener");
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for Cache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.check_reentrancy();
        let segment = self.segment.read();
        let mut metrics = segment.metrics.to_btreemap();
        metrics.insert("capacity".to_string(), self.capacity.get() as f64);
        metrics.insert("size".to_string(), segment.len() as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        self.policy.name()
    }
}

impl<K, V, S> fmt::Debug for Cache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.check_reentrancy();
        f.debug_struct("Cache")
            .field("capacity", &self.capacity)
            .field("len", &self.segment.read().map.len())
            .field("policy", &self.policy)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl<K, V, S> fmt::Display for Cache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.check_reentrancy();
        write!(
            f,
            "Cache{{capacity={}, size={}, policy={}}}",
            self.capacity,
            self.segment.read().map.len(),
            self.policy
        )
    }
}

/// Marks the current thread as running the listener until dropped, including
/// when the listener unwinds.
struct NotifyGuard<'a> {
    slot: &'a AtomicUsize,
}

impl<'a> NotifyGuard<'a> {
    fn enter(slot: &'a AtomicUsize) -> Self {
        slot.store(thread_token(), Ordering::Release);
        NotifyGuard { slot }
    }
}

impl Drop for NotifyGuard<'_> {
    fn drop(&mut self) {
        self.slot.store(0, Ordering::Release);
    }
}

/// Non-zero value unique to each live thread.
fn thread_token() -> usize {
    std::thread_local! {
        static TOKEN: u8 = const { 0 };
    }
    TOKEN.with(|token| token as *const u8 as usize)
}
