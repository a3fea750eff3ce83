//! Handle-bound wrappers over a borrowed `SlotMap`.
//!
//! A wrapper stores the handle, never a position, and resolves it again on
//! every access.

use crate::error::InvalidHandle;
use crate::handle::Handle;
use crate::policy::{ErasePolicy, SwapPop};
use crate::slot_map::SlotMap;
use core::fmt;

/// Read-only wrapper binding a handle to the map that issued it.
pub struct SlotWrap<'m, T, P: ErasePolicy = SwapPop> {
    handle: Handle,
    map: &'m SlotMap<T, P>,
}

impl<'m, T, P: ErasePolicy> SlotWrap<'m, T, P> {
    pub(crate) fn new(handle: Handle, map: &'m SlotMap<T, P>) -> Self {
        Self { handle, map }
    }

    /// The bound handle.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn get(&self) -> Result<&'m T, InvalidHandle> {
        self.map.get(self.handle)
    }

    pub fn is_valid(&self) -> bool {
        self.map.contains(self.handle)
    }
}

impl<T, P: ErasePolicy> Clone for SlotWrap<'_, T, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, P: ErasePolicy> Copy for SlotWrap<'_, T, P> {}

impl<T: fmt::Debug, P: ErasePolicy> fmt::Debug for SlotWrap<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotWrap")
            .field("handle", &self.handle)
            .field("value", &self.get().ok())
            .finish()
    }
}

/// Mutable wrapper binding a handle to the map that issued it.
///
/// The map stays reachable through [`SlotWrapMut::map_mut`], so other values
/// (or the bound one) can be inserted and erased while the wrapper is held.
pub struct SlotWrapMut<'m, T, P: ErasePolicy = SwapPop> {
    handle: Handle,
    map: &'m mut SlotMap<T, P>,
}

impl<'m, T, P: ErasePolicy> SlotWrapMut<'m, T, P> {
    pub(crate) fn new(handle: Handle, map: &'m mut SlotMap<T, P>) -> Self {
        Self { handle, map }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn get(&self) -> Result<&T, InvalidHandle> {
        self.map.get(self.handle)
    }

    pub fn get_mut(&mut self) -> Result<&mut T, InvalidHandle> {
        self.map.get_mut(self.handle)
    }

    /// Resolve once more and keep the borrow for the wrapper's lifetime.
    pub fn into_mut(self) -> Result<&'m mut T, InvalidHandle> {
        self.map.get_mut(self.handle)
    }

    pub fn is_valid(&self) -> bool {
        self.map.contains(self.handle)
    }

    pub fn map(&self) -> &SlotMap<T, P> {
        &*self.map
    }

    pub fn map_mut(&mut self) -> &mut SlotMap<T, P> {
        &mut *self.map
    }
}

impl<T: fmt::Debug, P: ErasePolicy> fmt::Debug for SlotWrapMut<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotWrapMut")
            .field("handle", &self.handle)
            .field("value", &self.get().ok())
            .finish()
    }
}
