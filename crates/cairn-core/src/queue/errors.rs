/// Why a queue operation did not go through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// The queue is frozen; nothing was changed.
    #[error("Queue is frozen.")]
    Frozen,

    /// No queued item is identical to the one given.
    #[error("Unable to locate item.")]
    NotFound,

    /// An index-based removal matched no items.
    #[error("Nothing to remove at index {index} (length {len}).")]
    NothingRemoved {
        /// Requested start index.
        index: isize,
        /// Queue length at the time of the call.
        len: usize,
    },
}
