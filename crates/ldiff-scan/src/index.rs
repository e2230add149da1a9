//! Key index: one cheap pass over an export collecting every entry key.

use std::io::{BufRead, Seek, SeekFrom};

use ldiff_types::Key;
use tracing::info;

use crate::cursor::{LineReader, ScanCursor};
use crate::error::ScanResult;

/// Every entry key of one export, in file order.
///
/// Duplicate keys are kept; lookups by the locator resolve to the first
/// matching entry after the cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyIndex {
    keys: Vec<Key>,
}

impl KeyIndex {
    /// Create an index from keys already in file order.
    pub fn new(keys: Vec<Key>) -> Self {
        Self { keys }
    }

    /// Number of entries in the export.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the export has no entries.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in file order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Iterate over keys in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.keys.iter()
    }

    /// Returns `true` if the key occurs in the export.
    pub fn contains(&self, key: &Key) -> bool {
        self.keys.contains(key)
    }
}

impl<'a> IntoIterator for &'a KeyIndex {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

/// Collect every key in `stream`, unwrapping folded key lines.
///
/// Attribute lines are skipped without being decoded. The stream is
/// rewound to the start before returning so the handle can be reused.
pub fn build_key_index<R: BufRead + Seek>(stream: &mut R) -> ScanResult<KeyIndex> {
    let mut keys = Vec::new();
    let mut reader = LineReader::at(stream, ScanCursor::START)?;
    while let Some(key) = reader.next_key()? {
        keys.push(key);
    }
    let lines = reader.position().line;

    stream.seek(SeekFrom::Start(0))?;
    info!(entries = keys.len(), lines, "built key index");
    Ok(KeyIndex::new(keys))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Seek};

    const EXPORT: &str = "\
version: 1

# people
dn: cn=Alice,dc=example
cn: Alice

dn: cn=Bob with a very long
  name,dc=example
cn: Bob
description: dn: looks like a key
 but is folded

dn: CN=Carol,DC=Example
cn: Carol
";

    #[test]
    fn collects_keys_in_file_order() {
        let mut stream = Cursor::new(EXPORT.as_bytes().to_vec());
        let index = build_key_index(&mut stream).unwrap();
        let keys: Vec<&str> = index.iter().map(Key::as_str).collect();
        assert_eq!(
            keys,
            [
                "cn=alice,dc=example",
                "cn=bob with a very long name,dc=example",
                "cn=carol,dc=example",
            ]
        );
        assert_eq!(index.len(), 3);
        assert!(index.contains(&Key::new("CN=ALICE,DC=EXAMPLE")));
    }

    #[test]
    fn rewinds_stream() {
        let mut stream = Cursor::new(EXPORT.as_bytes().to_vec());
        build_key_index(&mut stream).unwrap();
        assert_eq!(stream.stream_position().unwrap(), 0);
    }

    #[test]
    fn empty_stream_has_no_keys() {
        let mut stream = Cursor::new(Vec::new());
        let index = build_key_index(&mut stream).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn duplicate_keys_are_kept() {
        let text = "dn: cn=x\ncn: 1\n\ndn: CN=X\ncn: 2\n";
        let mut stream = Cursor::new(text.as_bytes().to_vec());
        let index = build_key_index(&mut stream).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.keys()[0], index.keys()[1]);
    }
}
