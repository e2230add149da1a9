//! Streaming record scanner for ldiff.
//!
//! Reads line-oriented directory exports (blank-line separated entries, each
//! opening with a `dn:` key line, long lines folded onto continuation lines
//! that start with a space) without loading the whole file into memory.
//!
//! # Key Types
//!
//! - [`RecordDecoder`] / [`decode_record`] -- Turn the lines of one entry into a [`Record`](ldiff_types::Record)
//! - [`KeyIndex`] / [`build_key_index`] -- Every key of a file, in file order
//! - [`RecordLocator`] / [`locate_record`] -- Find one entry by key, resuming from a [`ScanCursor`]
//! - [`LocateResult`] -- The located record (if any) and where the scan stopped

pub mod cursor;
pub mod decoder;
pub mod error;
pub mod index;
pub mod locator;

pub use cursor::ScanCursor;
pub use decoder::{classify, decode_record, Feed, LineKind, RecordDecoder};
pub use error::{ScanError, ScanResult};
pub use index::{build_key_index, KeyIndex};
pub use locator::{locate_record, LocateResult, RecordLocator};
