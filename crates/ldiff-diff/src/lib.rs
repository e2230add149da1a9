//! Record differ for ldiff.
//!
//! Compares two normalized records that share a key and classifies every
//! difference by attribute: names present on one side only, and names whose
//! sorted value lists differ.
//!
//! # Key Types
//!
//! - [`RecordDiff`] -- All differences for one key
//! - [`MissingAttribute`] / [`Side`] -- An attribute absent on one side
//! - [`AttributeMismatch`] / [`ValueChange`] -- Differing values for one attribute

pub mod record_diff;
pub mod value_diff;

pub use record_diff::{diff_records, AttributeMismatch, MissingAttribute, RecordDiff, Side};
pub use value_diff::ValueChange;
