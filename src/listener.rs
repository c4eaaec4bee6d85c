//! Eviction notification.
//!
//! An [`EvictionListener`] is an optional callback the cache invokes once for
//! every entry it drops to stay within capacity. Explicit `remove` and `clear`
//! never notify.
//!
//! # Re-entrancy
//!
//! The listener runs synchronously **inside the cache's critical section**:
//! the evicted entry has already been detached from both indices, and the
//! write lock is still held. Consequently:
//!
//! - the listener must not call any method on the cache that invoked it.
//!   Doing so is a contract violation; the cache detects it and panics on the
//!   calling thread instead of deadlocking.
//! - the listener should return quickly, since every other thread using the
//!   cache is blocked until it does.
//!
//! Forwarding evicted entries to a channel, a second cache, or a counter is
//! fine.

use core::fmt;

/// Callback invoked with the owned key and value of each evicted entry.
///
/// # Examples
///
/// ```
/// use bounded_cache::{Cache, EvictionListener};
/// use std::sync::mpsc;
/// use std::sync::Mutex;
///
/// let (tx, rx) = mpsc::channel();
/// let tx = Mutex::new(tx);
/// let listener = EvictionListener::new(move |key: &'static str, value: i32| {
///     let _ = tx.lock().unwrap().send((key, value));
/// });
///
/// let cache = Cache::builder(1).eviction_listener(listener).build().unwrap();
/// cache.put("a", 1);
/// cache.put("b", 2);
/// assert_eq!(rx.try_recv(), Ok(("a", 1)));
/// ```
pub struct EvictionListener<K, V> {
    callback: Box<dyn Fn(K, V) + Send + Sync>,
}

impl<K, V> EvictionListener<K, V> {
    /// Wraps a closure as an eviction listener.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(K, V) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Delivers one eviction.
    #[inline]
    pub(crate) fn on_eviction(&self, key: K, value: V) {
        (self.callback)(key, value)
    }
}

impl<K, V> fmt::Debug for EvictionListener<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvictionListener").finish_non_exhaustive()
    }
}
