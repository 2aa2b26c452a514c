//! Generational slot arena.
//!
//! Stores values in a `Vec` of slots and hands out [`SlotId`] handles that
//! stay valid until the value is removed. Freed slots are recycled through a
//! free list; each slot carries a generation counter that is bumped on every
//! removal, so a handle to a freed slot never resolves to the value that later
//! reuses it.
//!
//! ```text
//!   slots: [ (gen 0, Some(A)) | (gen 1, None) | (gen 0, Some(C)) ]
//!   free_list: [1]
//!
//!   insert(D) -> reuses slot 1 -> SlotId { index: 1, generation: 1 }
//!   old SlotId { index: 1, generation: 0 } -> get() == None
//! ```

/// Stable handle to a value stored in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: usize,
    generation: u32,
}

impl SlotId {
    /// Returns the slot index.
    pub fn index(self) -> usize {
        self.index
    }

    /// Returns the generation this handle was issued for.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        let id = if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index];
            debug_assert!(slot.value.is_none());
            slot.value = Some(value);
            SlotId {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            SlotId {
                index: self.slots.len() - 1,
                generation: 0,
            }
        };
        self.len += 1;
        id
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every value. Slots are kept (with bumped generations) so that
    /// handles issued before the clear stay dead.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_list.push(index);
        }
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value.as_ref().map(|value| {
                (
                    SlotId {
                        index,
                        generation: slot.generation,
                    },
                    value,
                )
            })
        })
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_arena_insert_remove_reuse() {
        let mut arena = SlotArena::new();
        let id1 = arena.insert("a");
        let id2 = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1), Some(&"a"));
        assert_eq!(arena.get(id2), Some(&"b"));

        assert_eq!(arena.remove(id1), Some("a"));
        assert_eq!(arena.len(), 1);

        let id3 = arena.insert("c");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id3), Some(&"c"));
        assert_eq!(id1.index(), id3.index());
        assert_ne!(id1.generation(), id3.generation());
    }

    #[test]
    fn stale_handle_does_not_alias_reused_slot() {
        let mut arena = SlotArena::new();
        let old = arena.insert(1);
        arena.remove(old);
        let new = arena.insert(2);

        assert_eq!(old.index(), new.index());
        assert_eq!(arena.get(old), None);
        assert!(arena.get_mut(old).is_none());
        assert_eq!(arena.remove(old), None);
        assert_eq!(arena.get(new), Some(&2));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn double_remove_is_noop() {
        let mut arena = SlotArena::new();
        let id = arena.insert("x");
        assert_eq!(arena.remove(id), Some("x"));
        assert_eq!(arena.remove(id), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn clear_invalidates_existing_handles() {
        let mut arena = SlotArena::with_capacity(4);
        let a = arena.insert(10);
        let b = arena.insert(20);
        arena.clear();

        assert!(arena.is_empty());
        assert!(!arena.contains(a));
        assert!(!arena.contains(b));

        let c = arena.insert(30);
        let d = arena.insert(40);
        assert!(!arena.contains(a));
        assert!(!arena.contains(b));
        assert_eq!(arena.get(c), Some(&30));
        assert_eq!(arena.get(d), Some(&40));
        assert_eq!(arena.iter().count(), 2);
    }

    #[test]
    fn iter_skips_free_slots() {
        let mut arena = SlotArena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        let c = arena.insert('c');
        arena.remove(b);

        let live: Vec<_> = arena.iter().collect();
        assert_eq!(live, vec![(a, &'a'), (c, &'c')]);
    }
}
