//! Insertion-order (FIFO) ordering.

use super::EvictionPolicy;
use crate::list::{List, SlotId};

/// First In, First Out ordering.
///
/// Accesses never reorder, so eviction order is arrival order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertionOrderPolicy;

impl EvictionPolicy for InsertionOrderPolicy {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    #[inline]
    fn record_access<T>(&self, _list: &mut List<T>, _id: SlotId) {}
}
