use std::fmt;

/// Slot of the permanent head sentinel.
const HEAD: usize = 0;
/// Slot of the permanent tail sentinel.
const TAIL: usize = 1;

/// Stable handle to a node in a [`List`].
///
/// A handle stays valid until the node it names is removed, either
/// explicitly or by [`List::clear`]. Vacated slots are
/// recycled, so a stale handle may later name an unrelated node; callers keep
/// their own index (the cache's key map) in sync with the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// Returns the raw arena index of this slot.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the doubly linked list.
///
/// Contains a value and the slot indices of the previous and next nodes.
/// Sentinel nodes and vacated slots carry no value.
struct Node<T> {
    /// The value stored in this node. `None` for sentinels and free slots.
    val: Option<T>,
    /// Slot of the previous node in the list.
    prev: usize,
    /// Slot of the next node in the list. Reused as the free-list link for
    /// vacated slots.
    next: usize,
}

impl<T> Node<T> {
    fn sigil() -> Self {
        Node {
            val: None,
            prev: HEAD,
            next: TAIL,
        }
    }
}

/// A doubly linked list stored in a slot arena.
///
/// The list is bounded by two sentinel nodes (sigils) at the head and tail
/// which are never removed and never hold data, so every real node always has
/// a valid `prev` and `next`. Links are arena indices rather than pointers,
/// and removed slots are threaded onto a free list and reused by later
/// insertions. All of `push_front`, `move_to_front`, `remove` and `peek_back`
/// are O(1).
///
/// Front-to-back order is the order the owning cache wants to keep entries
/// in: the node just before the tail sentinel is the next one to go.
///
/// # Examples
///
/// ```
/// use bounded_cache::list::List;
///
/// let mut list = List::new();
/// let a = list.push_front("a");
/// let b = list.push_front("b");
/// assert_eq!(list.peek_back(), Some(a));
///
/// list.move_to_front(a);
/// assert_eq!(list.peek_back(), Some(b));
/// assert_eq!(list.remove(b), Some("b"));
/// assert_eq!(list.len(), 1);
/// ```
pub struct List<T> {
    nodes: Vec<Node<T>>,
    /// Head of the chain of vacated slots, linked through `Node::next`.
    free: Option<usize>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list containing only the two sentinels.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `cap` nodes before the arena
    /// needs to grow.
    pub fn with_capacity(cap: usize) -> Self {
        let mut nodes = Vec::with_capacity(cap + 2);
        nodes.push(Node::sigil());
        nodes.push(Node::sigil());
        List {
            nodes,
            free: None,
            len: 0,
        }
    }

    /// Returns the current number of items in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a value to the front of the list and returns its handle.
    pub fn push_front(&mut self, v: T) -> SlotId {
        let node = Node {
            val: Some(v),
            prev: HEAD,
            next: TAIL,
        };
        let idx = match self.free {
            Some(idx) => {
                self.free = self.next_free(idx);
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.attach(idx);
        self.len += 1;
        SlotId(idx)
    }

    /// Moves a node to the front of the list (after the head sentinel).
    ///
    /// Does nothing if `id` does not name a live node or the node is already
    /// first.
    pub fn move_to_front(&mut self, id: SlotId) {
        if !self.is_live(id.0) || self.nodes[HEAD].next == id.0 {
            return;
        }
        self.detach(id.0);
        self.attach(id.0);
    }

    /// Detaches a node from the list and returns its value.
    ///
    /// Returns `None` if `id` does not name a live node.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.is_live(id.0) {
            return None;
        }
        self.detach(id.0);
        let node = &mut self.nodes[id.0];
        let val = node.val.take();
        node.prev = HEAD;
        node.next = self.free.unwrap_or(HEAD);
        self.free = Some(id.0);
        self.len -= 1;
        val
    }

    /// Returns the handle of the last node, the one nearest the tail
    /// sentinel, or `None` if the list is empty.
    #[inline]
    pub fn peek_back(&self) -> Option<SlotId> {
        let last = self.nodes[TAIL].prev;
        (last != HEAD).then_some(SlotId(last))
    }

    /// Returns a reference to the value of a live node.
    #[inline]
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.nodes.get(id.0).and_then(|node| node.val.as_ref())
    }

    /// Returns a mutable reference to the value of a live node.
    #[inline]
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.nodes.get_mut(id.0).and_then(|node| node.val.as_mut())
    }

    /// Removes every node, keeping only the sentinels.
    ///
    /// The arena's allocation is retained for reuse.
    pub fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD].next = TAIL;
        self.nodes[TAIL].prev = HEAD;
        self.free = None;
        self.len = 0;
    }

    /// Iterates over values front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD].next,
            remaining: self.len,
        }
    }

    fn is_live(&self, idx: usize) -> bool {
        idx > TAIL && self.nodes.get(idx).is_some_and(|node| node.val.is_some())
    }

    fn next_free(&self, idx: usize) -> Option<usize> {
        match self.nodes[idx].next {
            HEAD => None,
            next => Some(next),
        }
    }

    /// Unlinks `idx` from its neighbours. The node's own links are left stale.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    /// Links `idx` directly after the head sentinel.
    fn attach(&mut self, idx: usize) {
        let first = self.nodes[HEAD].next;
        self.nodes[idx].prev = HEAD;
        self.nodes[idx].next = first;
        self.nodes[first].prev = idx;
        self.nodes[HEAD].next = idx;
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Front-to-back iterator over a [`List`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    list: &'a List<T>,
    cursor: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.cursor == TAIL {
            return None;
        }
        let node = &self.list.nodes[self.cursor];
        self.cursor = node.next;
        self.remaining -= 1;
        node.val.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn test_new_list_is_empty() {
        let list: List<u32> = List::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.peek_back(), None);
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = List::new();
        let a = list.push_front(1);
        list.push_front(2);
        list.push_front(3);
        assert_eq!(collect(&list), vec![3, 2, 1]);
        assert_eq!(list.peek_back(), Some(a));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::new();
        let a = list.push_front(1);
        let b = list.push_front(2);
        list.push_front(3);

        list.move_to_front(a);
        assert_eq!(collect(&list), vec![1, 3, 2]);
        assert_eq!(list.peek_back(), Some(b));

        // Already first: nothing changes.
        list.move_to_front(a);
        assert_eq!(collect(&list), vec![1, 3, 2]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_remove_from_middle_and_ends() {
        let mut list = List::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(collect(&list), vec!["c", "a"]);
        assert_eq!(list.remove(a), Some("a"));
        assert_eq!(list.remove(c), Some("c"));
        assert!(list.is_empty());
        assert_eq!(list.peek_back(), None);
    }

    #[test]
    fn test_remove_twice_returns_none() {
        let mut list = List::new();
        let a = list.push_front(10);
        assert_eq!(list.remove(a), Some(10));
        assert_eq!(list.remove(a), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_sentinel_handles_are_rejected() {
        let mut list = List::new();
        list.push_front(1);
        assert_eq!(list.remove(SlotId(HEAD)), None);
        assert_eq!(list.remove(SlotId(TAIL)), None);
        list.move_to_front(SlotId(TAIL));
        assert_eq!(list.get(SlotId(HEAD)), None);
        assert_eq!(collect(&list), vec![1]);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut list = List::with_capacity(2);
        let a = list.push_front(1);
        let b = list.push_front(2);
        list.remove(a);
        list.remove(b);

        let c = list.push_front(3);
        let d = list.push_front(4);
        let mut reused = vec![c.index(), d.index()];
        reused.sort_unstable();
        let mut original = vec![a.index(), b.index()];
        original.sort_unstable();
        assert_eq!(reused, original);
        assert_eq!(list.nodes.len(), 4);
        assert_eq!(collect(&list), vec![4, 3]);
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut list = List::new();
        let a = list.push_front(1);
        if let Some(v) = list.get_mut(a) {
            *v = 42;
        }
        assert_eq!(list.get(a), Some(&42));
    }

    #[test]
    fn test_clear_keeps_sentinels() {
        let mut list = List::new();
        for i in 0..5 {
            list.push_front(i);
        }
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.peek_back(), None);

        let a = list.push_front(7);
        assert_eq!(list.peek_back(), Some(a));
        assert_eq!(collect(&list), vec![7]);
    }

    #[test]
    fn test_interleaved_operations() {
        let mut list = List::new();
        let mut ids = Vec::new();
        for i in 0..10 {
            ids.push(list.push_front(i));
        }
        for id in ids.iter().step_by(2) {
            list.remove(*id);
        }
        list.move_to_front(ids[1]);
        for i in 10..13 {
            list.push_front(i);
        }
        assert_eq!(collect(&list), vec![12, 11, 10, 1, 9, 7, 5, 3]);
        assert_eq!(list.len(), 8);
        assert_eq!(list.iter().len(), 8);
    }
}
