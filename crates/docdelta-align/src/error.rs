//! Error types for the align crate.

/// Errors that can occur during alignment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlignError {
    /// One side has more blocks than the configured ceiling. The LCS table
    /// would need `(old_blocks + 1) * (new_blocks + 1)` cells.
    #[error(
        "document too large to compare: {old_blocks} x {new_blocks} blocks \
         (limit is {limit} blocks per side)"
    )]
    ResourceLimitExceeded {
        old_blocks: usize,
        new_blocks: usize,
        limit: usize,
    },
}

/// Convenience alias for alignment results.
pub type AlignResult<T> = Result<T, AlignError>;
