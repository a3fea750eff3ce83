//! SharedSlotMap: a reference-counted `SlotMap` whose wrappers can be held
//! across erasures, including erasure of their own referent.

use crate::error::InvalidHandle;
use crate::handle::Handle;
use crate::policy::{ErasePolicy, SwapPop};
use crate::slot_map::SlotMap;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;
use std::rc::Rc;

/// Single-threaded shared `SlotMap`. Clones share the same storage.
///
/// # Panics
/// Mutating methods panic if a `Ref`/`RefMut` obtained from this map (for
/// example through [`SharedWrap::get`]) is still alive, as with `RefCell`.
pub struct SharedSlotMap<T, P: ErasePolicy = SwapPop> {
    inner: Rc<RefCell<SlotMap<T, P>>>, // !Send + !Sync through Rc
}

impl<T, P: ErasePolicy> SharedSlotMap<T, P> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SlotMap::with_capacity(capacity))),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.inner.borrow().contains(handle)
    }

    pub fn insert(&self, value: T) -> Handle {
        self.inner.borrow_mut().insert(value)
    }

    /// Remove and return the value. The map is no longer borrowed when the
    /// caller receives it.
    pub fn remove(&self, handle: Handle) -> Option<T> {
        self.inner.borrow_mut().remove(handle)
    }

    /// Erase the value; a no-op for stale handles. The value is dropped after
    /// the map's borrow is released, so its `Drop` may use the map again.
    pub fn erase(&self, handle: Handle) {
        let removed = self.remove(handle);
        drop(removed);
    }

    /// Drop every value and invalidate every handle. Values are dropped after
    /// the map's borrow is released.
    pub fn clear(&self) {
        let capacity = self.inner.borrow().capacity();
        let old = self.inner.replace(SlotMap::with_capacity(capacity));
        drop(old);
    }

    pub fn get(&self, handle: Handle) -> Result<Ref<'_, T>, InvalidHandle> {
        let map = self.inner.borrow();
        map.get(handle)?;
        Ok(Ref::map(map, |m| &m[handle]))
    }

    pub fn get_mut(&self, handle: Handle) -> Result<RefMut<'_, T>, InvalidHandle> {
        let mut map = self.inner.borrow_mut();
        map.get_mut(handle)?;
        Ok(RefMut::map(map, |m| &mut m[handle]))
    }

    /// Borrow the whole map, e.g. for iteration.
    pub fn borrow(&self) -> Ref<'_, SlotMap<T, P>> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, SlotMap<T, P>> {
        self.inner.borrow_mut()
    }

    /// Wrapper that keeps this map alive and resolves `handle` on each access.
    pub fn as_wrap(&self, handle: Handle) -> SharedWrap<T, P> {
        SharedWrap {
            handle,
            map: self.clone(),
        }
    }

    /// Whether both values share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T, P: ErasePolicy> Clone for SharedSlotMap<T, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, P: ErasePolicy> Default for SharedSlotMap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: ErasePolicy> From<SlotMap<T, P>> for SharedSlotMap<T, P> {
    fn from(map: SlotMap<T, P>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(map)),
        }
    }
}

impl<T: fmt::Debug, P: ErasePolicy> fmt::Debug for SharedSlotMap<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(map) => f.debug_tuple("SharedSlotMap").field(&*map).finish(),
            Err(_) => f.write_str("SharedSlotMap(<borrowed>)"),
        }
    }
}

/// Handle bound to a [`SharedSlotMap`]. Never caches a position: every
/// access re-validates the handle, so a wrapper created before its referent
/// was erased reports [`InvalidHandle`] afterwards.
pub struct SharedWrap<T, P: ErasePolicy = SwapPop> {
    handle: Handle,
    map: SharedSlotMap<T, P>,
}

impl<T, P: ErasePolicy> SharedWrap<T, P> {
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// The map this wrapper is bound to.
    pub fn owner(&self) -> &SharedSlotMap<T, P> {
        &self.map
    }

    pub fn get(&self) -> Result<Ref<'_, T>, InvalidHandle> {
        self.map.get(self.handle)
    }

    pub fn get_mut(&self) -> Result<RefMut<'_, T>, InvalidHandle> {
        self.map.get_mut(self.handle)
    }

    pub fn is_valid(&self) -> bool {
        self.map.contains(self.handle)
    }
}

impl<T, P: ErasePolicy> Clone for SharedWrap<T, P> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle,
            map: self.map.clone(),
        }
    }
}

impl<T, P: ErasePolicy> PartialEq for SharedWrap<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle && self.map.ptr_eq(&other.map)
    }
}

impl<T, P: ErasePolicy> Eq for SharedWrap<T, P> {}

impl<T: fmt::Debug, P: ErasePolicy> fmt::Debug for SharedWrap<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedWrap")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}
