//! Attribute-level diff between two records.
//!
//! Names are compared case-insensitively (records store them lower-cased)
//! and value lists are compared after sorting, so neither the letter case of
//! a name nor the order of values in the export affects the outcome.

use std::fmt;

use ldiff_types::{IgnoreSet, Key, Record};
use serde::{Deserialize, Serialize};

/// Which export a record came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Source,
    Target,
}

impl Side {
    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Source => Side::Target,
            Side::Target => Side::Source,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Target => f.write_str("target"),
        }
    }
}

/// An attribute present on one side only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingAttribute {
    /// Lower-cased attribute name.
    pub attribute: String,
    /// The side that lacks the attribute.
    pub missing_on: Side,
}

impl fmt::Display for MissingAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attribute '{}' is missing on {}",
            self.attribute, self.missing_on
        )
    }
}

/// An attribute present on both sides with different values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMismatch {
    /// Lower-cased attribute name.
    pub attribute: String,
    /// Sorted source values.
    pub source: Vec<String>,
    /// Sorted target values.
    pub target: Vec<String>,
}

/// All differences found for one key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDiff {
    pub key: Key,
    /// Attributes absent on one side, ordered by name.
    pub missing: Vec<MissingAttribute>,
    /// Attributes with differing values, ordered by name.
    pub mismatches: Vec<AttributeMismatch>,
    /// Number of differing or missing attributes.
    pub count: usize,
}

impl RecordDiff {
    /// Number of attributes missing on the given side.
    pub fn missing_on(&self, side: Side) -> usize {
        self.missing.iter().filter(|m| m.missing_on == side).count()
    }

    /// Look up the mismatch for an attribute.
    pub fn mismatch(&self, attribute: &str) -> Option<&AttributeMismatch> {
        let attribute = attribute.to_lowercase();
        self.mismatches.iter().find(|m| m.attribute == attribute)
    }
}

/// Compare two records presumed to share a key.
///
/// Attributes in `ignore` are skipped on both sides. Returns `None` when
/// nothing differs. The diff carries the key of `source`.
pub fn diff_records(source: &Record, target: &Record, ignore: &IgnoreSet) -> Option<RecordDiff> {
    let mut missing = Vec::new();
    let mut mismatches = Vec::new();

    // Walk source names: missing on target, or compare values.
    for (name, source_values) in source.attributes() {
        if ignore.contains(name) {
            continue;
        }
        match target.attributes().get(name) {
            Some(target_values) => {
                if source_values != target_values {
                    mismatches.push(AttributeMismatch {
                        attribute: name.clone(),
                        source: source_values.clone(),
                        target: target_values.clone(),
                    });
                }
            }
            None => missing.push(MissingAttribute {
                attribute: name.clone(),
                missing_on: Side::Target,
            }),
        }
    }

    // Names only the target has.
    for name in target.attributes().keys() {
        if !ignore.contains(name) && !source.attributes().contains_key(name) {
            missing.push(MissingAttribute {
                attribute: name.clone(),
                missing_on: Side::Source,
            });
        }
    }
    missing.sort_by(|a, b| a.attribute.cmp(&b.attribute));

    let count = missing.len() + mismatches.len();
    if count == 0 {
        return None;
    }

    Some(RecordDiff {
        key: source.key().clone(),
        missing,
        mismatches,
        count,
    })
}
