#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Policy Selection Guide
//!
//! | Policy | Access reorders? | Evicts first | Best Use Case |
//! |--------|------------------|--------------|---------------|
//! | [`EvictionPolicyKind::Recency`] | yes | least recently used | workloads with temporal locality |
//! | [`EvictionPolicyKind::InsertionOrder`] | no | oldest insertion | arrival-ordered data, predictable eviction |
//!
//! ## Performance Characteristics
//!
//! | Operation | Time | Lock |
//! |-----------|------|------|
//! | `get` | O(1) | write |
//! | `put` | O(1) | write |
//! | `remove` | O(1) | write |
//! | `contains_key` | O(1) | read |
//! | `len` / `capacity` | O(1) | read / none |
//! | `clear` | O(n) | write |
//!
//! ## Code Examples
//!
//! ### Recency (LRU)
//!
//! ```rust
//! use bounded_cache::Cache;
//!
//! let cache = Cache::new(2).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! ```
//!
//! ### Insertion order (FIFO)
//!
//! ```rust
//! use bounded_cache::{Cache, EvictionPolicyKind};
//!
//! let cache = Cache::with_policy(2, EvictionPolicyKind::InsertionOrder).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // reads never reorder
//! cache.put("c", 3);    // "a" evicted (first in)
//! assert!(cache.get(&"a").is_none());
//! ```
//!
//! ### Eviction listener
//!
//! ```rust
//! use bounded_cache::Cache;
//! use std::sync::{Arc, Mutex};
//!
//! let evicted = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&evicted);
//! let cache = Cache::builder(2)
//!     .on_eviction(move |key: &'static str, value: i32| sink.lock().unwrap().push((key, value)))
//!     .build()
//!     .unwrap();
//!
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("c", 3);
//! assert_eq!(*evicted.lock().unwrap(), vec![("a", 1)]);
//! ```
//!
//! ### Sharing across threads
//!
//! ```rust
//! use bounded_cache::Cache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(Cache::new(1000).unwrap());
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 cache.put((t, i), i);
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```
//!
//! ## Modules
//!
//! - [`cache`]: the thread-safe [`Cache`]
//! - [`list`]: arena-backed doubly linked list with sentinels (the ordered index)
//! - [`policy`]: eviction ordering strategies
//! - [`listener`]: eviction notification
//! - [`config`]: configuration struct and builder
//! - [`metrics`]: counters and reporting
//! - [`error`]: configuration errors

/// Owned key/value pair stored in each cache slot.
pub mod entry;

/// Doubly linked list stored in a slot arena.
///
/// This is the ordered index the cache keeps its eviction order in: two
/// permanent sentinel nodes bound the list, links are slot indices, and
/// vacated slots are recycled through a free list.
pub mod list;

/// Eviction ordering policies.
///
/// Provides the [`EvictionPolicy`](policy::EvictionPolicy) trait, the recency
/// (LRU) and insertion-order (FIFO) implementations, and the
/// [`EvictionPolicyKind`] tagged union the cache holds.
pub mod policy;

/// Eviction notification callback.
pub mod listener;

/// Cache configuration structures.
pub mod config;

/// Configuration errors.
pub mod error;

/// Cache metrics system.
///
/// Counters for hits, misses, insertions, updates, evictions and removals,
/// reported through the [`CacheMetrics`](metrics::CacheMetrics) trait.
pub mod metrics;

/// The thread-safe cache.
pub mod cache;

pub use cache::{Cache, DefaultHashBuilder};
pub use config::{CacheBuilder, CacheConfig};
pub use entry::CacheEntry;
pub use error::ConfigError;
pub use listener::EvictionListener;
pub use metrics::CacheMetrics;
pub use policy::EvictionPolicyKind;
