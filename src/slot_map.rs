//! SlotMap: dense value storage addressed through generational handles.

use crate::error::InvalidHandle;
use crate::free_list::FreeSlots;
use crate::handle::Handle;
use crate::policy::{ErasePolicy, Ordered, SwapPop};
use crate::slot::{Slot, SlotState, INITIAL_GENERATION};
use crate::wrap::{SlotWrap, SlotWrapMut};
use core::fmt;
use core::iter::Zip;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};
use core::slice;

/// Slot map with O(1) swap-and-pop erasure.
pub type DenseSlotMap<T> = SlotMap<T, SwapPop>;
/// Slot map whose iteration order follows insertion order.
pub type OrderedSlotMap<T> = SlotMap<T, Ordered>;

pub type Iter<'a, T> = slice::Iter<'a, T>;
pub type IterMut<'a, T> = slice::IterMut<'a, T>;
pub type IntoIter<T> = std::vec::IntoIter<T>;

/// Densely packed values addressed by [`Handle`]s.
///
/// Values live contiguously in insertion slots of one `Vec<T>`; the index
/// table maps handle ids to positions in it. The erase policy `P` decides
/// whether erasure is O(1) ([`SwapPop`]) or order preserving ([`Ordered`]).
#[derive(Clone)]
pub struct SlotMap<T, P: ErasePolicy = SwapPop> {
    elements: Vec<T>,
    // owners[p] is the id whose slot points at elements[p]
    owners: Vec<usize>,
    slots: Vec<Slot>,
    free: P::FreeSlots,
    _policy: PhantomData<P>,
}

impl<T, P: ErasePolicy> SlotMap<T, P> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-reserve room for `capacity` values. Purely a performance hint.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut free = P::FreeSlots::default();
        free.reserve(capacity);
        Self {
            elements: Vec::with_capacity(capacity),
            owners: Vec::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free,
            _policy: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of values the dense store holds without reallocating.
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.elements.reserve(additional);
        self.owners.reserve(additional);
        // Vacant ids are reused before the table grows.
        let vacant = self.free.len();
        self.slots.reserve(additional.saturating_sub(vacant));
        self.free.reserve(additional);
    }

    /// Insert a value and return the handle it is stored under.
    pub fn insert(&mut self, value: T) -> Handle {
        self.insert_with(|_| value)
    }

    /// Insert the value built by `make`, which receives the handle the value
    /// will be stored under. The map is untouched if `make` panics.
    pub fn insert_with<F>(&mut self, make: F) -> Handle
    where
        F: FnOnce(Handle) -> T,
    {
        let handle = self.next_handle();
        let value = make(handle);

        let position = self.elements.len();
        let id = match self.free.pop(&self.slots) {
            Some(id) => {
                self.slots[id].state = SlotState::Occupied { position };
                trace!("reusing slot {} at generation {}", id, self.slots[id].generation);
                id
            }
            None => {
                self.slots.push(Slot::occupied(position));
                self.slots.len() - 1
            }
        };
        debug_assert_eq!(id, handle.id());

        self.elements.push(value);
        self.owners.push(id);
        handle
    }

    fn next_handle(&self) -> Handle {
        match self.free.peek() {
            Some(id) => Handle::new(id, self.slots[id].generation),
            None => Handle::new(self.slots.len(), INITIAL_GENERATION),
        }
    }

    /// Dense position of the value `handle` refers to.
    fn position(&self, handle: Handle) -> Result<usize, InvalidHandle> {
        let id = handle.id();
        let slot = self.slots.get(id).ok_or(InvalidHandle::OutOfBounds {
            id,
            len: self.slots.len(),
        })?;
        match slot.position() {
            Some(position) if slot.generation == handle.generation() => Ok(position),
            _ => Err(InvalidHandle::Stale {
                id,
                generation: handle.generation(),
                current: slot.generation,
            }),
        }
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.position(handle).is_ok()
    }

    pub fn get(&self, handle: Handle) -> Result<&T, InvalidHandle> {
        let position = self.position(handle)?;
        Ok(&self.elements[position])
    }

    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut T, InvalidHandle> {
        let position = self.position(handle)?;
        Ok(&mut self.elements[position])
    }

    /// Remove the value `handle` refers to and hand it back.
    ///
    /// Returns `None` for a stale or out-of-bounds handle, leaving the map
    /// untouched. On success the handle and every copy of it become invalid.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let position = self.position(handle).ok()?;
        let id = handle.id();
        let value = P::detach(&mut self.elements, &mut self.owners, &mut self.slots, position);

        let slot = &mut self.slots[id];
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(&mut self.slots, id);
        trace!("erased slot {} (now generation {})", id, self.slots[id].generation);
        Some(value)
    }

    /// Drop the value `handle` refers to. Erasing with a stale handle is a
    /// no-op, so erasing twice is the same as erasing once.
    pub fn erase(&mut self, handle: Handle) {
        if self.remove(handle).is_none() {
            trace!("ignored erase of invalid handle {:?}", handle);
        }
    }

    /// Drop every value and forget every id. All handles issued so far
    /// become out of bounds.
    pub fn clear(&mut self) {
        trace!("clearing {} values, {} slots", self.elements.len(), self.slots.len());
        self.slots.clear();
        self.owners.clear();
        self.free.clear();
        self.elements.clear();
    }

    /// Keep only the values for which `keep` returns `true`.
    ///
    /// Values are visited from the back of the dense store to the front.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(Handle, &mut T) -> bool,
    {
        let mut position = self.elements.len();
        while position > 0 {
            position -= 1;
            let id = self.owners[position];
            let handle = Handle::new(id, self.slots[id].generation);
            if !keep(handle, &mut self.elements[position]) {
                // Whatever moves into `position` was already visited.
                self.erase(handle);
            }
        }
    }

    /// Wrapper that resolves `handle` against this map on every access.
    pub fn as_wrap(&self, handle: Handle) -> SlotWrap<'_, T, P> {
        SlotWrap::new(handle, self)
    }

    /// Mutable wrapper that resolves `handle` against this map on every access.
    pub fn as_wrap_mut(&mut self, handle: Handle) -> SlotWrapMut<'_, T, P> {
        SlotWrapMut::new(handle, self)
    }

    /// Live values in dense order.
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elements
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.elements.iter_mut()
    }

    /// Live values in dense order together with their handles.
    pub fn iter_with_handles(&self) -> Entries<'_, T> {
        Entries {
            it: self.owners.iter().zip(self.elements.iter()),
            slots: &self.slots,
        }
    }

    pub fn iter_mut_with_handles(&mut self) -> EntriesMut<'_, T> {
        EntriesMut {
            it: self.owners.iter().zip(self.elements.iter_mut()),
            slots: &self.slots,
        }
    }

    /// Handles of all live values in dense order.
    pub fn handles(&self) -> impl DoubleEndedIterator<Item = Handle> + ExactSizeIterator + '_ {
        self.iter_with_handles().map(|(handle, _)| handle)
    }

    /// Check every structural invariant; panics on the first violation.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.elements.len(), self.owners.len(), "owner table length");
        for (position, &id) in self.owners.iter().enumerate() {
            assert_eq!(
                self.slots[id].state,
                SlotState::Occupied { position },
                "owner of position {position} does not point back"
            );
        }

        let occupied = self
            .slots
            .iter()
            .filter(|s| matches!(s.state, SlotState::Occupied { .. }))
            .count();
        assert_eq!(occupied, self.elements.len(), "occupied slot count");

        let free = self.free.ids(&self.slots);
        assert_eq!(free.len(), self.free.len(), "free registry length");
        assert_eq!(free.len() + occupied, self.slots.len(), "every id accounted for");
        let mut seen = std::collections::BTreeSet::new();
        for id in free {
            assert!(seen.insert(id), "id {id} registered twice");
            assert!(
                matches!(self.slots[id].state, SlotState::Vacant { .. }),
                "free id {id} is occupied"
            );
        }
    }
}

impl<T, P: ErasePolicy> Default for SlotMap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: ErasePolicy> Index<Handle> for SlotMap<T, P> {
    type Output = T;

    /// # Panics
    /// Panics if the handle is invalid.
    fn index(&self, handle: Handle) -> &T {
        match self.get(handle) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T, P: ErasePolicy> IndexMut<Handle> for SlotMap<T, P> {
    fn index_mut(&mut self, handle: Handle) -> &mut T {
        match self.get_mut(handle) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T: fmt::Debug, P: ErasePolicy> fmt::Debug for SlotMap<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter_with_handles()).finish()
    }
}

impl<'a, T, P: ErasePolicy> IntoIterator for &'a SlotMap<T, P> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, P: ErasePolicy> IntoIterator for &'a mut SlotMap<T, P> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, P: ErasePolicy> IntoIterator for SlotMap<T, P> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

/// Iterator over `(Handle, &T)` in dense order.
pub struct Entries<'a, T> {
    it: Zip<slice::Iter<'a, usize>, slice::Iter<'a, T>>,
    slots: &'a [Slot],
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (Handle, &'a T);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        self.it
            .next()
            .map(|(&id, value)| (Handle::new(id, slots[id].generation), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<T> DoubleEndedIterator for Entries<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        self.it
            .next_back()
            .map(|(&id, value)| (Handle::new(id, slots[id].generation), value))
    }
}

impl<T> ExactSizeIterator for Entries<'_, T> {}

/// Iterator over `(Handle, &mut T)` in dense order.
pub struct EntriesMut<'a, T> {
    it: Zip<slice::Iter<'a, usize>, slice::IterMut<'a, T>>,
    slots: &'a [Slot],
}

impl<'a, T> Iterator for EntriesMut<'a, T> {
    type Item = (Handle, &'a mut T);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        self.it
            .next()
            .map(|(&id, value)| (Handle::new(id, slots[id].generation), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<T> DoubleEndedIterator for EntriesMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        self.it
            .next_back()
            .map(|(&id, value)| (Handle::new(id, slots[id].generation), value))
    }
}

impl<T> ExactSizeIterator for EntriesMut<'_, T> {}
