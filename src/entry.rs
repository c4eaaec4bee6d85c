//! Cache Entry Type
//!
//! A `CacheEntry<K, V>` is the owned `(key, value)` pair a cache stores for
//! each resident key. Entries live exclusively inside the ordered index
//! ([`List`](crate::list::List)); the key map only holds a
//! [`SlotId`](crate::list::SlotId) naming the slot, never a second copy of the
//! entry.
//!
//! The entry carries no link fields of its own: the list node that owns it
//! holds the `prev`/`next` slot indices.
//!
//! # Lifecycle
//!
//! - created when a new key is inserted with `put`
//! - value replaced in place by a later `put` of the same key
//! - destroyed exactly once, by `remove`, `clear`, or capacity eviction, at
//!   which point [`CacheEntry::into_parts`] hands the pair back to the caller
//!   or the eviction listener

use core::fmt;

/// Owned key/value pair stored in a cache slot.
///
/// # Examples
///
/// ```
/// use bounded_cache::entry::CacheEntry;
///
/// let mut entry = CacheEntry::new("key", 1);
/// assert_eq!(entry.replace_value(2), 1);
/// assert_eq!(entry.into_parts(), ("key", 2));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    /// The cached key
    pub key: K,

    /// The cached value
    pub value: V,
}

impl<K, V> CacheEntry<K, V> {
    /// Creates a new cache entry.
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Replaces the value, returning the previous one.
    #[inline]
    pub fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    /// Consumes the entry, returning its key and value.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CacheEntry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}
