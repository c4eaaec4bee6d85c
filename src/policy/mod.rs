//! Eviction Policies
//!
//! A policy decides how the ordered index ([`List`]) is maintained as entries
//! are inserted and touched, and which entry goes first when the cache is full.
//! Both policies keep the most valuable entry at the front and evict from the
//! back; they differ only in what an access does.
//!
//! | Policy | Access | Insertion | Candidate |
//! |--------|--------|-----------|-----------|
//! | [`RecencyPolicy`] (LRU) | move to front | push front | back |
//! | [`InsertionOrderPolicy`] (FIFO) | no-op | push front | back |
//!
//! The cache holds an [`EvictionPolicyKind`], a tagged union over the two
//! implementations, chosen once at construction. Policies are never swapped on
//! a live cache: the order already recorded in the list would be meaningless
//! to the new policy.
//!
//! # Examples
//!
//! ```
//! use bounded_cache::list::List;
//! use bounded_cache::policy::{EvictionPolicy, EvictionPolicyKind};
//!
//! let policy = EvictionPolicyKind::InsertionOrder;
//! let mut list = List::new();
//! let first = policy.record_insertion(&mut list, "first");
//! policy.record_insertion(&mut list, "second");
//!
//! // FIFO ignores accesses, so the first insertion is still the candidate.
//! policy.record_access(&mut list, first);
//! assert_eq!(policy.eviction_candidate(&list), Some(first));
//! ```

mod insertion_order;
mod recency;

pub use self::insertion_order::InsertionOrderPolicy;
pub use self::recency::RecencyPolicy;

use crate::list::{List, SlotId};
use core::fmt;

/// Strategy maintaining a cache's eviction order.
///
/// Every method is O(1). The default methods implement the behaviour shared by
/// both policies: new entries enter at the front and the back-most entry is the
/// eviction candidate.
pub trait EvictionPolicy {
    /// Short identifier for the policy, e.g. `"LRU"`.
    fn name(&self) -> &'static str;

    /// Records a hit on an existing entry (`get`, or `put` of a present key).
    fn record_access<T>(&self, list: &mut List<T>, id: SlotId);

    /// Places a new entry into the order and returns its handle.
    #[inline]
    fn record_insertion<T>(&self, list: &mut List<T>, value: T) -> SlotId {
        list.push_front(value)
    }

    /// Returns the entry to evict next, or `None` if the list is empty.
    #[inline]
    fn eviction_candidate<T>(&self, list: &List<T>) -> Option<SlotId> {
        list.peek_back()
    }

    /// Drops an entry from the order, returning it.
    #[inline]
    fn remove<T>(&self, list: &mut List<T>, id: SlotId) -> Option<T> {
        list.remove(id)
    }

    /// Forgets every entry.
    #[inline]
    fn clear<T>(&self, list: &mut List<T>) {
        list.clear()
    }
}

/// The eviction policy installed in a cache.
///
/// Defaults to [`EvictionPolicyKind::Recency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvictionPolicyKind {
    /// Least recently used entries are evicted first; `get` and `put` of a
    /// present key refresh an entry.
    #[default]
    Recency,
    /// Entries are evicted in arrival order; accesses never reorder.
    InsertionOrder,
}

impl EvictionPolicy for EvictionPolicyKind {
    fn name(&self) -> &'static str {
        match self {
            EvictionPolicyKind::Recency => RecencyPolicy.name(),
            EvictionPolicyKind::InsertionOrder => InsertionOrderPolicy.name(),
        }
    }

    #[inline]
    fn record_access<T>(&self, list: &mut List<T>, id: SlotId) {
        match self {
            EvictionPolicyKind::Recency => RecencyPolicy.record_access(list, id),
            EvictionPolicyKind::InsertionOrder => InsertionOrderPolicy.record_access(list, id),
        }
    }

    #[inline]
    fn record_insertion<T>(&self, list: &mut List<T>, value: T) -> SlotId {
        match self {
            EvictionPolicyKind::Recency => RecencyPolicy.record_insertion(list, value),
            EvictionPolicyKind::InsertionOrder => InsertionOrderPolicy.record_insertion(list, value),
        }
    }

    #[inline]
    fn eviction_candidate<T>(&self, list: &List<T>) -> Option<SlotId> {
        match self {
            EvictionPolicyKind::Recency => RecencyPolicy.eviction_candidate(list),
            EvictionPolicyKind::InsertionOrder => InsertionOrderPolicy.eviction_candidate(list),
        }
    }

    #[inline]
    fn remove<T>(&self, list: &mut List<T>, id: SlotId) -> Option<T> {
        match self {
            EvictionPolicyKind::Recency => RecencyPolicy.remove(list, id),
            EvictionPolicyKind::InsertionOrder => InsertionOrderPolicy.remove(list, id),
        }
    }

    #[inline]
    fn clear<T>(&self, list: &mut List<T>) {
        match self {
            EvictionPolicyKind::Recency => RecencyPolicy.clear(list),
            EvictionPolicyKind::InsertionOrder => InsertionOrderPolicy.clear(list),
        }
    }
}

impl fmt::Display for EvictionPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
