//! Index-table entries.

/// Generation given to an id the first time it is allocated.
pub(crate) const INITIAL_GENERATION: u64 = 0;

/// Where an id currently points.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SlotState {
    /// The id owns the value at `position` in the dense store.
    Occupied { position: usize },
    /// The id is free; `next_free` links to the id freed before it when the
    /// free list is threaded through the table.
    Vacant { next_free: Option<usize> },
}

/// One index-table entry. Entries are never removed except by `clear()`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Slot {
    pub generation: u64,
    pub state: SlotState,
}

impl Slot {
    pub(crate) fn occupied(position: usize) -> Self {
        Slot {
            generation: INITIAL_GENERATION,
            state: SlotState::Occupied { position },
        }
    }

    pub(crate) fn position(&self) -> Option<usize> {
        match self.state {
            SlotState::Occupied { position } => Some(position),
            SlotState::Vacant { .. } => None,
        }
    }
}
