use ldiff_diff::RecordDiff;
use ldiff_types::{GeneralizedTime, Key};
use serde::{Deserialize, Serialize};

/// An entry present in one export only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingEntry {
    pub key: Key,
    /// Raw creation-time value from the side that has the entry.
    pub created: Option<String>,
}

impl MissingEntry {
    /// The parsed creation time, if present and well-formed.
    pub fn created_time(&self) -> Option<GeneralizedTime> {
        self.created
            .as_deref()
            .and_then(|raw| GeneralizedTime::parse(raw).ok())
    }
}

/// The complete outcome of reconciling two exports.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Entries in the source export.
    pub source_count: usize,
    /// Entries in the target export.
    pub target_count: usize,
    /// Source entries with no intact counterpart in the target, in source order.
    pub missing_on_target: Vec<MissingEntry>,
    /// Target entries with no intact counterpart in the source, in target order.
    pub missing_on_source: Vec<MissingEntry>,
    /// Attribute diffs for entries present in both, in source order.
    pub diffs: Vec<RecordDiff>,
}

impl Reconciliation {
    /// An empty result for exports of the given sizes.
    pub fn new(source_count: usize, target_count: usize) -> Self {
        Self {
            source_count,
            target_count,
            ..Default::default()
        }
    }

    /// Returns `true` if the exports hold the same entries with the same values.
    pub fn is_clean(&self) -> bool {
        self.missing_on_target.is_empty()
            && self.missing_on_source.is_empty()
            && self.diffs.is_empty()
    }

    /// Total number of differing or missing attributes across all diffs.
    pub fn attribute_differences(&self) -> usize {
        self.diffs.iter().map(|d| d.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_result_is_clean() {
        let r = Reconciliation::new(3, 4);
        assert!(r.is_clean());
        assert_eq!(r.source_count, 3);
        assert_eq!(r.target_count, 4);
        assert_eq!(r.attribute_differences(), 0);
    }

    #[test]
    fn created_time_parses_label() {
        let entry = MissingEntry {
            key: Key::new("cn=x"),
            created: Some("20230105102233Z".into()),
        };
        assert_eq!(
            entry.created_time().unwrap().to_string(),
            "2023-01-05 10:22:33 UTC"
        );

        let garbled = MissingEntry {
            key: Key::new("cn=x"),
            created: Some("yesterday".into()),
        };
        assert!(garbled.created_time().is_none());
    }
}
