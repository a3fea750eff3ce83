//! Free-slot registries: which ids can be handed out again.

use crate::slot::{Slot, SlotState};
use core::fmt::Debug;

/// Registry of vacant ids. Implementations mark the slot vacant on `push`;
/// generation bookkeeping stays with the map.
pub trait FreeSlots: Clone + Debug + Default {
    /// Id the next `pop` will return, without taking it.
    fn peek(&self) -> Option<usize>;
    /// Take a vacant id for reuse.
    fn pop(&mut self, slots: &[Slot]) -> Option<usize>;
    /// Register `id` as vacant.
    fn push(&mut self, slots: &mut [Slot], id: usize);
    fn len(&self) -> usize;
    fn clear(&mut self);
    fn reserve(&mut self, additional: usize);

    /// All registered ids, most recently freed first.
    #[cfg(test)]
    fn ids(&self, slots: &[Slot]) -> Vec<usize>;
}

/// Singly-linked free list threaded through the `next_free` link of vacant
/// slots. `tail` names the most recently freed id.
#[derive(Copy, Clone, Debug, Default)]
pub struct ThreadedFreeList {
    tail: Option<usize>,
    len: usize,
}

impl FreeSlots for ThreadedFreeList {
    #[inline]
    fn peek(&self) -> Option<usize> {
        self.tail
    }

    fn pop(&mut self, slots: &[Slot]) -> Option<usize> {
        let id = self.tail?;
        let SlotState::Vacant { next_free } = slots[id].state else {
            unreachable!("free list links to occupied slot {id}");
        };
        self.tail = next_free;
        self.len -= 1;
        Some(id)
    }

    fn push(&mut self, slots: &mut [Slot], id: usize) {
        slots[id].state = SlotState::Vacant {
            next_free: self.tail,
        };
        self.tail = Some(id);
        self.len += 1;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.tail = None;
        self.len = 0;
    }

    // Links live inside the slots; nothing to reserve.
    fn reserve(&mut self, _additional: usize) {}

    #[cfg(test)]
    fn ids(&self, slots: &[Slot]) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cursor = self.tail;
        while let Some(id) = cursor {
            out.push(id);
            cursor = match slots[id].state {
                SlotState::Vacant { next_free } => next_free,
                SlotState::Occupied { .. } => None,
            };
        }
        out
    }
}

/// Plain stack of vacant ids.
#[derive(Clone, Debug, Default)]
pub struct FreeStack {
    ids: Vec<usize>,
}

impl FreeSlots for FreeStack {
    #[inline]
    fn peek(&self) -> Option<usize> {
        self.ids.last().copied()
    }

    fn pop(&mut self, _slots: &[Slot]) -> Option<usize> {
        self.ids.pop()
    }

    fn push(&mut self, slots: &mut [Slot], id: usize) {
        slots[id].state = SlotState::Vacant { next_free: None };
        self.ids.push(id);
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn clear(&mut self) {
        self.ids.clear();
    }

    fn reserve(&mut self, additional: usize) {
        self.ids.reserve(additional);
    }

    #[cfg(test)]
    fn ids(&self, _slots: &[Slot]) -> Vec<usize> {
        self.ids.iter().rev().copied().collect()
    }
}
