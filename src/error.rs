//! Error types.

/// Errors surfaced by fail-fast cursors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChampError {
    /// The collection was modified by something other than the cursor
    /// since the cursor last synchronized with it.
    #[error("collection modified during iteration (expected modification count {expected}, found {actual})")]
    ConcurrentModification {
        /// Modification count the cursor expected.
        expected: u64,
        /// Modification count the collection reported.
        actual: u64,
    },
    /// `remove` was called before `next`, or twice for the same element.
    #[error("cursor has no current element to remove")]
    CursorState,
}

/// Result alias for fallible collection operations.
pub type Result<T> = std::result::Result<T, ChampError>;
