//! Handle: generational ticket issued by a `SlotMap`.

use crate::error::InvalidHandle;
use crate::policy::ErasePolicy;
use crate::slot_map::SlotMap;

/// Stable reference to a value stored in a [`SlotMap`].
///
/// A handle stays valid until its value is erased. After that every lookup
/// through it fails, even if the id is later reused for a new value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle {
    id: usize,
    generation: u64,
}

impl Handle {
    pub(crate) fn new(id: usize, generation: u64) -> Self {
        Handle { id, generation }
    }

    /// Index-table id. Ids are reused after erasure.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Generation the id had when this handle was issued.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn value<'a, T, P: ErasePolicy>(
        &self,
        map: &'a SlotMap<T, P>,
    ) -> Result<&'a T, InvalidHandle> {
        map.get(*self)
    }

    pub fn value_mut<'a, T, P: ErasePolicy>(
        &self,
        map: &'a mut SlotMap<T, P>,
    ) -> Result<&'a mut T, InvalidHandle> {
        map.get_mut(*self)
    }
}
