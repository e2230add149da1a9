//! Record decoding: from the physical lines of one entry to a [`Record`].
//!
//! An entry is a key line (`dn: ...`) followed by `name: value` lines and
//! terminated by an empty line, the next key line, or end of input. A line
//! starting with a space or tab continues the previous line; the marker is
//! dropped and the rest is appended verbatim. Comment lines (`#`) and their
//! continuations are skipped.

use std::collections::BTreeMap;

use ldiff_types::{normalize_attribute_name, IgnoreSet, Key, Record};

use crate::error::{ScanError, ScanResult};

/// Attribute name that marks a key line.
const KEY_ATTRIBUTE: &str = "dn";

/// Classification of a single physical line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty line: ends the current entry.
    Blank,
    /// `# ...`
    Comment,
    /// Folded continuation; carries the text after the marker.
    Continuation(&'a str),
    /// `dn: ...`; carries the raw text after the colon.
    Key(&'a str),
    /// `name: value`; the value has leading whitespace removed.
    Attribute { name: &'a str, value: &'a str },
    /// Not blank, not a continuation, and no `:` delimiter.
    Malformed,
}

/// Strip the continuation marker, if the line has one.
pub(crate) fn continuation(line: &str) -> Option<&str> {
    line.strip_prefix(&[' ', '\t'][..])
}

/// Classify one physical line (line ending already removed).
pub fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if let Some(rest) = continuation(line) {
        return LineKind::Continuation(rest);
    }
    if line.starts_with('#') {
        return LineKind::Comment;
    }
    match line.split_once(':') {
        Some((name, value)) => {
            let name = name.trim();
            if name.is_empty() {
                LineKind::Malformed
            } else if name.eq_ignore_ascii_case(KEY_ATTRIBUTE) {
                LineKind::Key(value)
            } else {
                LineKind::Attribute {
                    name,
                    value: value.trim_start(),
                }
            }
        }
        None => LineKind::Malformed,
    }
}

/// What the decoder saw on the line it was just fed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feed {
    /// The entry continues.
    Continue,
    /// An empty line ended the entry; the line is consumed.
    Blank,
    /// A key line ended the entry; the line belongs to the next entry.
    NextKey,
}

/// Incremental decoder for the body of one entry.
///
/// Feed it the lines after the key line until it reports a boundary, then
/// call [`finish`](Self::finish). Repeated attribute names accumulate as
/// separate values. Ignored attributes are parsed but not stored.
#[derive(Debug)]
pub struct RecordDecoder<'a> {
    key: Key,
    ignore: &'a IgnoreSet,
    attributes: BTreeMap<String, Vec<String>>,
    current: Option<(String, String)>,
    in_comment: bool,
}

impl<'a> RecordDecoder<'a> {
    /// Start decoding the entry named by `key`.
    pub fn new(key: Key, ignore: &'a IgnoreSet) -> Self {
        Self {
            key,
            ignore,
            attributes: BTreeMap::new(),
            current: None,
            in_comment: false,
        }
    }

    /// The key of the entry being decoded.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Feed one physical line. `number` is only used for error reporting.
    pub fn feed(&mut self, number: u64, line: &str) -> ScanResult<Feed> {
        match classify(line) {
            LineKind::Blank => {
                self.flush();
                Ok(Feed::Blank)
            }
            LineKind::Key(_) => {
                self.flush();
                Ok(Feed::NextKey)
            }
            LineKind::Comment => {
                self.flush();
                self.in_comment = true;
                Ok(Feed::Continue)
            }
            LineKind::Continuation(rest) => {
                if !self.in_comment {
                    if let Some((_, value)) = self.current.as_mut() {
                        value.push_str(rest);
                    }
                }
                Ok(Feed::Continue)
            }
            LineKind::Attribute { name, value } => {
                self.flush();
                self.in_comment = false;
                self.current = Some((normalize_attribute_name(name), value.to_string()));
                Ok(Feed::Continue)
            }
            LineKind::Malformed => Err(ScanError::MalformedLine {
                line: number,
                content: line.to_string(),
            }),
        }
    }

    /// Complete the entry and build the record.
    pub fn finish(mut self) -> Record {
        self.flush();
        Record::new(self.key, self.attributes)
    }

    fn flush(&mut self) {
        let Some((name, value)) = self.current.take() else {
            return;
        };
        if self.ignore.contains(&name) {
            return;
        }
        self.attributes
            .entry(name)
            .or_default()
            .push(value.trim().to_string());
    }
}

/// Decode one entry from its lines, starting at (or before) its key line.
///
/// Leading blank and comment lines are skipped. Returns `None` when the
/// first meaningful line is not a key line or the input is empty. Decoding
/// stops at the first boundary; later lines are not examined.
pub fn decode_record<'l, I>(lines: I, ignore: &IgnoreSet) -> ScanResult<Option<Record>>
where
    I: IntoIterator<Item = &'l str>,
{
    let mut lines = lines.into_iter().zip(1u64..).peekable();

    let key_text = loop {
        match lines.next() {
            None => return Ok(None),
            Some((line, _)) => match classify(line) {
                LineKind::Blank | LineKind::Comment | LineKind::Continuation(_) => continue,
                LineKind::Key(value) => break value,
                _ => return Ok(None),
            },
        }
    };

    let mut raw = key_text.to_string();
    while let Some(rest) = lines.peek().and_then(|&(line, _)| continuation(line)) {
        raw.push_str(rest);
        lines.next();
    }

    let mut decoder = RecordDecoder::new(Key::new(&raw), ignore);
    for (line, number) in lines {
        if decoder.feed(number, line)? != Feed::Continue {
            break;
        }
    }
    Ok(Some(decoder.finish()))
}
