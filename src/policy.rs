//! Erase policies: how the dense store closes the hole left by an erased value.
//!
//! A policy is chosen per map through its type parameter. The two policies
//! keep different free-slot registries, so a map never switches between them.

use crate::free_list::{FreeSlots, FreeStack, ThreadedFreeList};
use crate::slot::{Slot, SlotState};

mod sealed {
    pub trait Sealed {}
}

/// Strategy for removing a value from the dense store.
///
/// Sealed: only [`SwapPop`] and [`Ordered`] implement it.
pub trait ErasePolicy: sealed::Sealed {
    /// Whether erasure keeps the relative order of the remaining values.
    const PRESERVES_ORDER: bool;

    #[doc(hidden)]
    type FreeSlots: FreeSlots;

    /// Remove the value at `position` from `elements` and `owners`, and
    /// repair the position of every id whose value moved.
    #[doc(hidden)]
    fn detach<T>(
        elements: &mut Vec<T>,
        owners: &mut Vec<usize>,
        slots: &mut [Slot],
        position: usize,
    ) -> T;
}

/// O(1) erase: the last value moves into the erased position. Iteration
/// order is not preserved across erasures. Free ids are threaded through the
/// vacant slots.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SwapPop;

impl sealed::Sealed for SwapPop {}

impl ErasePolicy for SwapPop {
    const PRESERVES_ORDER: bool = false;
    type FreeSlots = ThreadedFreeList;

    fn detach<T>(
        elements: &mut Vec<T>,
        owners: &mut Vec<usize>,
        slots: &mut [Slot],
        position: usize,
    ) -> T {
        let value = elements.swap_remove(position);
        owners.swap_remove(position);
        // Nothing moved when the erased value was the last one.
        if let Some(&moved) = owners.get(position) {
            slots[moved].state = SlotState::Occupied { position };
        }
        value
    }
}

/// O(n) erase: later values shift down by one, so iteration always follows
/// insertion order. Free ids are kept on a stack.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Ordered;

impl sealed::Sealed for Ordered {}

impl ErasePolicy for Ordered {
    const PRESERVES_ORDER: bool = true;
    type FreeSlots = FreeStack;

    fn detach<T>(
        elements: &mut Vec<T>,
        owners: &mut Vec<usize>,
        slots: &mut [Slot],
        position: usize,
    ) -> T {
        let value = elements.remove(position);
        owners.remove(position);
        for (shifted, &id) in owners.iter().enumerate().skip(position) {
            slots[id].state = SlotState::Occupied { position: shifted };
        }
        value
    }
}
