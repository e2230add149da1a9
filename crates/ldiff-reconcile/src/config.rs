use std::path::Path;

use ldiff_types::IgnoreSet;
use serde::{Deserialize, Serialize};

use crate::error::ReconcileResult;

/// Attribute used for creation-time labels unless configured otherwise.
pub const DEFAULT_TIMESTAMP_ATTRIBUTE: &str = "createTimestamp";

/// Configuration for a reconciliation run.
///
/// Loadable from TOML:
///
/// ```toml
/// ignore = ["modifyTimestamp", "entryCSN"]
/// timestamp_attribute = "createTimestamp"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Attribute names excluded from differencing (case-insensitive).
    pub ignore: IgnoreSet,
    /// Attribute carrying the entry creation time, used to label missing
    /// entries. `None` or an empty name disables labels.
    pub timestamp_attribute: Option<String>,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            ignore: IgnoreSet::new(),
            timestamp_attribute: Some(DEFAULT_TIMESTAMP_ATTRIBUTE.to_string()),
        }
    }
}

impl ReconcileConfig {
    /// Default configuration with the given ignore set.
    pub fn with_ignore(ignore: IgnoreSet) -> Self {
        Self {
            ignore,
            ..Default::default()
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> ReconcileResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> ReconcileResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// The creation-time attribute, if labels are enabled.
    pub fn timestamp_attribute(&self) -> Option<&str> {
        self.timestamp_attribute
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Attributes the decoder may drop outright.
    ///
    /// The creation-time attribute is always decoded so labels stay
    /// available even when it is ignored for differencing.
    pub fn decode_ignore(&self) -> IgnoreSet {
        let mut ignore = self.ignore.clone();
        if let Some(name) = self.timestamp_attribute() {
            ignore.remove(name);
        }
        ignore
    }
}
