//! Value-level alignment of a mismatched attribute.
//!
//! Uses the `similar` crate (Myers diff algorithm) over the two sorted value
//! lists so a report can mark which values exist only on one side.

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

use crate::record_diff::AttributeMismatch;

/// One value in the aligned listing of a mismatched attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", content = "value", rename_all = "lowercase")]
pub enum ValueChange {
    /// Present on both sides.
    Unchanged(String),
    /// Present on the source only.
    Removed(String),
    /// Present on the target only.
    Added(String),
}

impl ValueChange {
    /// The value text.
    pub fn value(&self) -> &str {
        match self {
            ValueChange::Unchanged(v) | ValueChange::Removed(v) | ValueChange::Added(v) => v,
        }
    }
}

impl AttributeMismatch {
    /// Align source and target values, in sorted order.
    pub fn value_changes(&self) -> Vec<ValueChange> {
        let source: Vec<&str> = self.source.iter().map(String::as_str).collect();
        let target: Vec<&str> = self.target.iter().map(String::as_str).collect();

        TextDiff::from_slices(&source, &target)
            .iter_all_changes()
            .map(|change| {
                let value = change.value().to_string();
                match change.tag() {
                    ChangeTag::Equal => ValueChange::Unchanged(value),
                    ChangeTag::Delete => ValueChange::Removed(value),
                    ChangeTag::Insert => ValueChange::Added(value),
                }
            })
            .collect()
    }

    /// Values present on the source only.
    pub fn only_in_source(&self) -> Vec<String> {
        self.value_changes()
            .into_iter()
            .filter_map(|c| match c {
                ValueChange::Removed(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    /// Values present on the target only.
    pub fn only_in_target(&self) -> Vec<String> {
        self.value_changes()
            .into_iter()
            .filter_map(|c| match c {
                ValueChange::Added(v) => Some(v),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch(source: &[&str], target: &[&str]) -> AttributeMismatch {
        AttributeMismatch {
            attribute: "member".into(),
            source: source.iter().map(|s| s.to_string()).collect(),
            target: target.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn replaced_single_value() {
        let m = mismatch(&["a@x.com"], &["b@x.com"]);
        let changes = m.value_changes();
        assert_eq!(changes.len(), 2);
        assert!(changes.contains(&ValueChange::Removed("a@x.com".into())));
        assert!(changes.contains(&ValueChange::Added("b@x.com".into())));
    }

    #[test]
    fn shared_values_are_unchanged() {
        let m = mismatch(&["a", "b", "c"], &["a", "c", "d"]);
        assert_eq!(m.only_in_source(), ["b"]);
        assert_eq!(m.only_in_target(), ["d"]);
        let changes = m.value_changes();
        let unchanged: Vec<&str> = changes
            .iter()
            .filter(|c| matches!(c, ValueChange::Unchanged(_)))
            .map(ValueChange::value)
            .collect();
        assert_eq!(unchanged, ["a", "c"]);
    }

    #[test]
    fn duplicate_value_shows_as_removed() {
        let m = mismatch(&["a", "a"], &["a"]);
        assert_eq!(m.only_in_source(), ["a"]);
        assert!(m.only_in_target().is_empty());
    }
}
