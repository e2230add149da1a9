//! Foundation types for ldiff.
//!
//! This crate provides the normalized data model shared by the scanner, the
//! differ, and the reconciler. Every other ldiff crate depends on
//! `ldiff-types`.
//!
//! # Key Types
//!
//! - [`Key`] -- Normalized (trimmed, lower-cased, unwrapped) entry identifier
//! - [`Record`] -- One directory entry: a key plus sorted multi-valued attributes
//! - [`IgnoreSet`] -- Case-insensitive set of attribute names excluded from diffing
//! - [`GeneralizedTime`] -- Compact `YYYYMMDDHHMMSS[Z]` timestamp used for creation labels

pub mod error;
pub mod ignore;
pub mod key;
pub mod record;
pub mod timestamp;

pub use error::{TypeError, TypeResult};
pub use ignore::IgnoreSet;
pub use key::Key;
pub use record::{normalize_attribute_name, Record};
pub use timestamp::{GeneralizedTime, Zone};
