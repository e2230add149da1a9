use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized identifier of a directory entry.
///
/// A `Key` is the distinguished name with continuation wrapping already
/// resolved, surrounding whitespace trimmed, and all characters lower-cased.
/// Two keys that differ only in case compare equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Key(String);

impl Key {
    /// Normalize raw key text into a `Key`.
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// The normalized key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the key is empty after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Key {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.0
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let key = Key::new("  CN=Alice,OU=People,DC=Example,DC=Com \t");
        assert_eq!(key.as_str(), "cn=alice,ou=people,dc=example,dc=com");
    }

    #[test]
    fn case_insensitive_equality() {
        assert_eq!(Key::new("cn=X"), Key::from("CN=x"));
    }

    #[test]
    fn empty_key() {
        assert!(Key::new("   ").is_empty());
    }

    #[test]
    fn display_and_debug() {
        let key = Key::new("cn=x");
        assert_eq!(format!("{key}"), "cn=x");
        assert_eq!(format!("{key:?}"), "Key(cn=x)");
    }

    #[test]
    fn serde_as_plain_string() {
        let json = serde_json::to_string(&Key::new("CN=X")).unwrap();
        assert_eq!(json, "\"cn=x\"");
        let parsed: Key = serde_json::from_str("\" CN=Y \"").unwrap();
        assert_eq!(parsed, Key::new("cn=y"));
    }
}
