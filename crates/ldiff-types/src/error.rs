use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid generalized time {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

/// Convenience alias for type results.
pub type TypeResult<T> = Result<T, TypeError>;
