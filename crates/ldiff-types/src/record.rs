//! Normalized directory entries.
//!
//! A [`Record`] is built once from a fully terminated entry and never mutated
//! afterwards. Value lists are sorted at construction so that the order in
//! which values appeared in the export never influences equality.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::key::Key;

/// Lower-case and trim an attribute name.
pub fn normalize_attribute_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// One directory entry: a key plus its multi-valued attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    key: Key,
    attributes: BTreeMap<String, Vec<String>>,
}

impl Record {
    /// Build a record, normalizing attribute names and sorting every value list.
    ///
    /// Duplicate values are preserved. Names that collide after normalization
    /// have their values merged.
    pub fn new(key: Key, attributes: BTreeMap<String, Vec<String>>) -> Self {
        let mut normalized: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, values) in attributes {
            normalized
                .entry(normalize_attribute_name(&name))
                .or_default()
                .extend(values);
        }
        for values in normalized.values_mut() {
            values.sort();
        }
        Self {
            key,
            attributes: normalized,
        }
    }

    /// Build a record from `(name, value)` pairs in export order.
    pub fn from_pairs<I, N, V>(key: Key, pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<String>,
    {
        let mut attributes: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in pairs {
            attributes
                .entry(normalize_attribute_name(name.as_ref()))
                .or_default()
                .push(value.into());
        }
        Self::new(key, attributes)
    }

    /// The entry key.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// All attributes, keyed by lower-cased name.
    pub fn attributes(&self) -> &BTreeMap<String, Vec<String>> {
        &self.attributes
    }

    /// Sorted values of an attribute (name lookup is case-insensitive).
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.attributes
            .get(&normalize_attribute_name(name))
            .map(Vec::as_slice)
    }

    /// The first sorted value of an attribute, if any.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.values(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns `true` if the record carries the attribute.
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(&normalize_attribute_name(name))
    }

    /// Attribute names in sorted order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Number of distinct attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
