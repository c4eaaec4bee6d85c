//! Cache Metrics System
//!
//! Counters recorded by the cache under its lock and reported through the
//! [`CacheMetrics`] trait as a `BTreeMap`, so metric names always come out in
//! the same order.
//!
//! Only `get` and `get_with` count as requests. `peek` and `contains_key` are
//! observations that leave both the ordering and the counters untouched.

use std::collections::BTreeMap;

/// Counters shared by every eviction policy.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get`/`get_with`)
    pub requests: u64,

    /// Lookups that found their key
    pub cache_hits: u64,

    /// New keys inserted by `put`
    pub insertions: u64,

    /// `put` calls that replaced the value of a present key
    pub updates: u64,

    /// Entries dropped to stay within capacity
    pub evictions: u64,

    /// Entries dropped by an explicit `remove`
    pub removals: u64,

    /// Number of `clear` calls
    pub clears: u64,
}

impl CoreCacheMetrics {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found its key.
    #[inline]
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that missed.
    #[inline]
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records the insertion of a new key.
    #[inline]
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records a value replacement on a present key.
    #[inline]
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records a capacity-driven eviction.
    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records an explicit removal.
    #[inline]
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Records a `clear`.
    #[inline]
    pub fn record_clear(&mut self) {
        self.clears += 1;
    }

    /// Lookups that missed.
    #[inline]
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups that hit, between 0.0 and 1.0, or 0.0 before the
    /// first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, between 0.0 and 1.0, or 0.0 before
    /// the first lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a map for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("clears".to_string(), self.clears as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics reporting.
pub trait CacheMetrics {
    /// Returns all metrics as name/value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Name of the eviction algorithm in use (e.g. `"LRU"`, `"FIFO"`).
    fn algorithm_name(&self) -> &'static str;
}
