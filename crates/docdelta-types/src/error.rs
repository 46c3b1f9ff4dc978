use thiserror::Error;

/// Errors produced while building blocks and document versions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown block type: {0:?}")]
    UnknownBlockType(String),

    #[error("block {id} has order index {actual}, expected {expected}")]
    OrderIndexMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate block id: {0}")]
    DuplicateBlockId(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for type-level results.
pub type TypeResult<T> = Result<T, TypeError>;
