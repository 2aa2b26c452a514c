//! Intrusive doubly linked list backed by `SlotArena`.
//!
//! Nodes live in a [`SlotArena`] and link to each other by [`SlotId`], giving
//! stable handles and O(1) positional updates without raw pointers. The list
//! does no locking; callers serialize access.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//!           (MRU)                    (LRU)
//! ```
//!
//! ## Length accounting
//!
//! `len()` is the arena's live-slot count. Only `push_*`, `remove`, `pop_back`
//! and `clear` allocate or free slots; `move_to_front` relinks an existing slot,
//! so it cannot change the length on any path.
//!
//! ## Performance
//! - `push_front` / `push_back`: O(1)
//! - `remove` / `pop_back`: O(1)
//! - `move_to_front`: O(1)
//! - `iter`, `check_invariants`: O(n)

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list that stores nodes in a `SlotArena` and links them via `SlotId`.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is currently a node in this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the value at the front (MRU) of the list.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Returns the handle at the front (MRU) of the list.
    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Returns the value at the back (LRU) of the list.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns the handle at the back (LRU) of the list.
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns an iterator from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Returns the value for a node id, if present.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to a node value, if present.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Inserts a new node at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head.and_then(|head| self.arena.get_mut(head)) {
            Some(old_head) => old_head.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Inserts a new node at the back and returns its handle.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail.and_then(|tail| self.arena.get_mut(tail)) {
            Some(old_tail) => old_tail.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Removes and returns the back value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Removes the node `id` from the list and returns its value.
    ///
    /// Returns `None` without touching the list if `id` is stale or unknown.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves an existing node to the front; returns `false` if `id` is not present.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    /// Clears the list and frees all nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Walks the chain from head to tail and verifies its structure.
    ///
    /// Checks that `prev`/`next` agree in both directions, that no node is
    /// visited twice, that the walk ends at `tail`, and that the number of
    /// reachable nodes equals `len()`.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() {
                return Err(InvariantError::new("head and tail disagree on emptiness"));
            }
            if !self.is_empty() {
                return Err(InvariantError::new(format!(
                    "list has no head but len is {}",
                    self.len()
                )));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;

        while let Some(id) = current {
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle or orphaned link in node chain"));
            }
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("dangling link to slot {}", id.index())))?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has inconsistent prev link",
                    id.index()
                )));
            }
            if node.next.is_none() && self.tail != Some(id) {
                return Err(InvariantError::new("chain ends before tail"));
            }
            prev = Some(id);
            current = node.next;
        }

        if count != self.len() {
            return Err(InvariantError::new(format!(
                "reachable nodes ({count}) differ from len ({})",
                self.len()
            )));
        }
        Ok(())
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev.and_then(|prev_id| self.arena.get_mut(prev_id)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|next_id| self.arena.get_mut(next_id)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }

        let node = self.arena.get_mut(id)?;
        node.prev = None;
        node.next = None;
        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        } else {
            return;
        }
        match old_head.and_then(|head| self.arena.get_mut(head)) {
            Some(head_node) => head_node.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over list values from front to back.
pub struct Iter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a IntrusiveList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn intrusive_list_basic_ops() {
        let mut list = IntrusiveList::new();
        let a = list.push_front("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert_eq!(list.front(), Some(&"a"));
        assert_eq!(list.back(), Some(&"c"));
        assert_eq!(list.len(), 3);

        assert!(list.move_to_front(c));
        assert_eq!(list.front(), Some(&"c"));
        assert_eq!(list.back(), Some(&"b"));

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(list.len(), 2);

        assert_eq!(list.pop_back(), Some("a"));
        assert_eq!(list.pop_back(), Some("c"));
        assert!(list.is_empty());

        assert!(!list.contains(a));
        list.check_invariants().unwrap();
    }

    #[test]
    fn empty_list_has_no_ends() {
        let list: IntrusiveList<u8> = IntrusiveList::default();
        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.front_id(), None);
        assert_eq!(list.back_id(), None);
        list.check_invariants().unwrap();
    }

    #[test]
    fn push_front_orders_newest_first() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);
        assert_eq!(values(&list), vec![3, 2, 1]);
        assert_eq!(list.front(), Some(&3));
        assert_eq!(list.back(), Some(&1));
    }

    #[test]
    fn move_to_front_preserves_len_on_every_path() {
        let mut list = IntrusiveList::new();
        let a = list.push_back('a');
        let b = list.push_back('b');
        let c = list.push_back('c');

        // Already head.
        assert!(list.move_to_front(a));
        assert_eq!(list.len(), 3);
        assert_eq!(values(&list), vec!['a', 'b', 'c']);

        // Middle.
        assert!(list.move_to_front(b));
        assert_eq!(list.len(), 3);
        assert_eq!(values(&list), vec!['b', 'a', 'c']);

        // Tail.
        assert!(list.move_to_front(c));
        assert_eq!(list.len(), 3);
        assert_eq!(values(&list), vec!['c', 'b', 'a']);
        assert_eq!(list.back_id(), Some(a));

        list.check_invariants().unwrap();
    }

    #[test]
    fn move_to_front_single_node() {
        let mut list = IntrusiveList::new();
        let only = list.push_front(42);
        assert!(list.move_to_front(only));
        assert_eq!(list.len(), 1);
        assert_eq!(list.front_id(), Some(only));
        assert_eq!(list.back_id(), Some(only));
        list.check_invariants().unwrap();
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = IntrusiveList::new();
        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(values(&list), vec!["a", "c"]);

        assert_eq!(list.remove(a), Some("a"));
        assert_eq!(list.front(), Some(&"c"));
        assert_eq!(list.back(), Some(&"c"));

        assert_eq!(list.remove(c), Some("c"));
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        list.check_invariants().unwrap();
    }

    #[test]
    fn stale_handles_are_noops() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        list.push_back(2);
        assert_eq!(list.remove(a), Some(1));

        assert_eq!(list.remove(a), None);
        assert!(!list.move_to_front(a));
        assert_eq!(list.get(a), None);
        assert_eq!(list.len(), 1);

        // Slot is recycled by the next push; the old handle must stay dead.
        let c = list.push_front(3);
        assert_eq!(c.index(), a.index());
        assert!(!list.contains(a));
        assert_eq!(list.remove(a), None);
        assert_eq!(values(&list), vec![3, 2]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn remove_on_empty_list_is_noop() {
        let mut list = IntrusiveList::new();
        let id = list.push_back(5);
        list.clear();
        assert_eq!(list.remove(id), None);
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn clear_resets_state() {
        let mut list = IntrusiveList::with_capacity(4);
        list.push_back(1);
        list.push_back(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_back(), None);

        list.push_front(9);
        assert_eq!(values(&list), vec![9]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn get_mut_updates_value() {
        let mut list = IntrusiveList::new();
        let id = list.push_back(10);
        if let Some(value) = list.get_mut(id) {
            *value = 20;
        }
        assert_eq!(list.get(id), Some(&20));
    }

    #[test]
    fn into_iterator_for_reference() {
        let mut list = IntrusiveList::new();
        list.push_back(1);
        list.push_back(2);
        let mut sum = 0;
        for v in &list {
            sum += v;
        }
        assert_eq!(sum, 3);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        PushFront(u16),
        PushBack(u16),
        Remove(usize),
        MoveToFront(usize),
        PopBack,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u16>().prop_map(Op::PushFront),
            any::<u16>().prop_map(Op::PushBack),
            any::<usize>().prop_map(Op::Remove),
            any::<usize>().prop_map(Op::MoveToFront),
            Just(Op::PopBack),
        ]
    }

    proptest! {
        /// Property: the list matches a `Vec` model after any operation sequence.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_vec_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
            let mut list = IntrusiveList::new();
            let mut model: Vec<(SlotId, u16)> = Vec::new();
            let mut issued: Vec<SlotId> = Vec::new();

            for op in ops {
                match op {
                    Op::PushFront(v) => {
                        let id = list.push_front(v);
                        model.insert(0, (id, v));
                        issued.push(id);
                    }
                    Op::PushBack(v) => {
                        let id = list.push_back(v);
                        model.push((id, v));
                        issued.push(id);
                    }
                    Op::Remove(i) => {
                        if issued.is_empty() {
                            continue;
                        }
                        let id = issued[i % issued.len()];
                        let expected = model
                            .iter()
                            .position(|(mid, _)| *mid == id)
                            .map(|pos| model.remove(pos).1);
                        prop_assert_eq!(list.remove(id), expected);
                    }
                    Op::MoveToFront(i) => {
                        if issued.is_empty() {
                            continue;
                        }
                        let id = issued[i % issued.len()];
                        let pos = model.iter().position(|(mid, _)| *mid == id);
                        prop_assert_eq!(list.move_to_front(id), pos.is_some());
                        if let Some(pos) = pos {
                            let entry = model.remove(pos);
                            model.insert(0, entry);
                        }
                    }
                    Op::PopBack => {
                        prop_assert_eq!(list.pop_back(), model.pop().map(|(_, v)| v));
                    }
                }

                prop_assert_eq!(list.len(), model.len());
                prop_assert!(list.check_invariants().is_ok());
            }

            let actual: Vec<u16> = list.iter().copied().collect();
            let expected: Vec<u16> = model.iter().map(|(_, v)| *v).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
