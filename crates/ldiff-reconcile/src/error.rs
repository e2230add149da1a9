//! Error types for the reconcile crate.

/// Errors that abort a reconciliation.
///
/// Per-entry anomalies never surface here; they end up as missing entries.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// Scanning one of the exports failed.
    #[error("scan error: {0}")]
    Scan(#[from] ldiff_scan::ScanError),

    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`ReconcileConfig`](crate::ReconcileConfig).
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Convenience alias for reconcile results.
pub type ReconcileResult<T> = Result<T, ReconcileError>;
