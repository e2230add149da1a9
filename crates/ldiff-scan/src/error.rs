//! Error types for the scan crate.

/// Errors that can occur while scanning an export.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The underlying stream could not be read or repositioned.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line inside an entry has no `name: value` delimiter.
    #[error("malformed line {line}: no ':' delimiter in {content:?}")]
    MalformedLine { line: u64, content: String },
}

/// Convenience alias for scan results.
pub type ScanResult<T> = Result<T, ScanError>;
