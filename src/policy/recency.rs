//! Recency (LRU) ordering.
//!
//! Every access moves the entry to the front, so the list is ordered by time
//! since last use and the least recently used entry sits at the back.

use super::EvictionPolicy;
use crate::list::{List, SlotId};

/// Least Recently Used ordering.
///
/// # Examples
///
/// ```
/// use bounded_cache::list::List;
/// use bounded_cache::policy::{EvictionPolicy, RecencyPolicy};
///
/// let mut list = List::new();
/// let a = RecencyPolicy.record_insertion(&mut list, "a");
/// let b = RecencyPolicy.record_insertion(&mut list, "b");
/// RecencyPolicy.record_access(&mut list, a);
/// assert_eq!(RecencyPolicy.eviction_candidate(&list), Some(b));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecencyPolicy;

impl EvictionPolicy for RecencyPolicy {
    fn name(&self) -> &'static str {
        "LRU"
    }

    #[inline]
    fn record_access<T>(&self, list: &mut List<T>, id: SlotId) {
        list.move_to_front(id);
    }
}
