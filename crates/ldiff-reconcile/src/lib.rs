//! Cross-export reconciler for ldiff.
//!
//! Drives the scanner and the differ over two exports of the same directory
//! (a *source* and a *target*) and assembles one [`Reconciliation`]:
//! entries missing on either side, plus attribute diffs for entries present
//! in both.
//!
//! # Key Types
//!
//! - [`Reconciler`] -- Two-pass orchestration over a pair of seekable streams
//! - [`ReconcileConfig`] -- Ignore set and creation-time attribute
//! - [`Reconciliation`] / [`MissingEntry`] -- The assembled result

pub mod config;
pub mod error;
pub mod reconciler;
pub mod result;

pub use config::{ReconcileConfig, DEFAULT_TIMESTAMP_ATTRIBUTE};
pub use error::{ReconcileError, ReconcileResult};
pub use reconciler::{reconcile, Reconciler};
pub use result::{MissingEntry, Reconciliation};
