//! dense-slotmap: a single-threaded container that stores values densely
//! and hands out generational `Handle`s instead of positions.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep values packed in one `Vec<T>` for iteration while every
//!   caller-facing reference is a `(id, generation)` ticket that is checked
//!   on each use.
//! - Layers:
//!   - `Handle`: inert `(id, generation)` pair; only the issuing map can
//!     interpret it.
//!   - Index table (`Slot`s): one entry per ever-allocated id holding the
//!     current dense position (or a vacancy link) and the generation.
//!   - Free-slot registry: a threaded free list (`SwapPop`) or a stack of
//!     ids (`Ordered`), selected by the erase policy type parameter.
//!   - Dense store + owner table: `elements[p]` is owned by `owners[p]`, so
//!     a relocation during erase can repair the index table in O(1).
//!   - Wrappers: `SlotWrap`/`SlotWrapMut` borrow a map, `SharedWrap` holds a
//!     `SharedSlotMap`; all of them re-resolve the handle on every access.
//!
//! Constraints
//! - Generations start at 0 for a fresh id and are bumped on every
//!   successful erase of that id. A handle is valid iff its generation
//!   matches its slot's and the slot is occupied.
//! - Erasing with a stale or foreign handle is a silent no-op.
//! - Every mutating method either completes all bookkeeping repairs or
//!   changes nothing; values are dropped only once the structure is
//!   consistent again.
//! - `clear()` empties the index table too, so every handle issued before
//!   it becomes out of bounds.
//!
//! Erase policies
//! - `SwapPop` (default): O(1) erase, moves the last value into the hole;
//!   iteration order is not preserved.
//! - `Ordered`: O(n) erase, shifts the tail down; iteration order equals
//!   insertion order of the surviving values.
//!
//! Overflow semantics
//! - Generations are `u64` and wrap on overflow. A handle could alias a new
//!   occupant only after 2^64 erasures of the same id.
//!
//! Notes and non-goals
//! - Single-threaded. `SlotMap` is `Send`/`Sync` when `T` is; the shared
//!   variant is `!Send`/`!Sync` through `Rc`.
//! - Handles are not branded; a handle from another map is only rejected
//!   when its id or generation does not match.
//! - No serialization and no shrinking beyond `clear()`.

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "logging")]
        log::trace!($($arg)*);
    };
}

mod error;
mod free_list;
mod handle;
pub mod policy;
mod shared;
mod slot;
pub mod slot_map;
mod slot_map_proptest;
mod wrap;

// Public surface
pub use error::InvalidHandle;
pub use handle::Handle;
pub use policy::{ErasePolicy, Ordered, SwapPop};
pub use shared::{SharedSlotMap, SharedWrap};
pub use slot_map::{DenseSlotMap, OrderedSlotMap, SlotMap};
pub use wrap::{SlotWrap, SlotWrapMut};
