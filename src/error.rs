//! Error type for handle resolution.

/// A handle could not be resolved against the map it was used with.
///
/// Both variants are the same failure kind; they only record why the
/// lookup was rejected. A failed lookup never mutates the map.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InvalidHandle {
    /// The id lies beyond the index table, e.g. after `clear()`.
    #[error("invalid handle: id {id} is out of bounds ({len} slots allocated)")]
    OutOfBounds { id: usize, len: usize },
    /// The slot exists but was erased (and possibly reused) since the
    /// handle was issued.
    #[error("invalid handle: id {id} has generation {generation}, slot is at generation {current}")]
    Stale {
        id: usize,
        generation: u64,
        current: u64,
    },
}

impl InvalidHandle {
    /// Id of the rejected handle.
    pub fn id(&self) -> usize {
        match *self {
            InvalidHandle::OutOfBounds { id, .. } | InvalidHandle::Stale { id, .. } => id,
        }
    }
}
