use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::normalize_attribute_name;

/// Case-insensitive set of attribute names excluded from differencing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct IgnoreSet(BTreeSet<String>);

impl IgnoreSet {
    /// Create an empty ignore set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute name. Returns `true` if it was not already present.
    pub fn insert(&mut self, name: &str) -> bool {
        self.0.insert(normalize_attribute_name(name))
    }

    /// Remove an attribute name. Returns `true` if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.0.remove(&normalize_attribute_name(name))
    }

    /// Returns `true` if the attribute is ignored.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&normalize_attribute_name(name))
    }

    /// Number of ignored names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing is ignored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ignored names, lower-cased, in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for IgnoreSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name.as_ref());
        }
    }
}

impl From<Vec<String>> for IgnoreSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<IgnoreSet> for Vec<String> {
    fn from(set: IgnoreSet) -> Self {
        set.0.into_iter().collect()
    }
}
