use docdelta_align::AlignError;
use docdelta_types::TypeError;
use thiserror::Error;

/// Errors surfaced by a comparison request.
#[derive(Debug, Error)]
pub enum CompareError {
    /// Alignment refused the input, e.g. a document over the block limit.
    #[error(transparent)]
    Align(#[from] AlignError),

    /// A document version was malformed.
    #[error("invalid input: {0}")]
    Input(#[from] TypeError),

    /// The configuration is invalid or could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompareError {
    /// Returns `true` if the input was rejected for being too large, which
    /// callers typically report as "split the document and retry".
    pub fn is_resource_limit(&self) -> bool {
        matches!(
            self,
            Self::Align(AlignError::ResourceLimitExceeded { .. })
        )
    }
}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, CompareError>;
