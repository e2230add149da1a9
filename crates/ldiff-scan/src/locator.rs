//! Record locator: find one entry by key, resuming from an explicit cursor.
//!
//! A lookup scans forward from the cursor, skipping entries whose key does
//! not match, and decodes the first matching entry. The returned cursor lets
//! the caller start the next lookup where this one stopped instead of
//! rereading the file from the top.

use std::io::{BufRead, Seek};

use ldiff_types::{IgnoreSet, Key, Record};
use tracing::{debug, warn};

use crate::cursor::{LineReader, ScanCursor};
use crate::decoder::{Feed, RecordDecoder};
use crate::error::{ScanError, ScanResult};

/// Outcome of one lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocateResult {
    /// The decoded entry, or `None` if no intact entry with the key was found.
    pub record: Option<Record>,
    /// Where the scan stopped: just past the located entry, or end of stream.
    pub cursor: ScanCursor,
}

impl LocateResult {
    /// Returns `true` if the entry was found.
    pub fn is_found(&self) -> bool {
        self.record.is_some()
    }
}

/// Locates entries in a seekable export.
#[derive(Clone, Debug, Default)]
pub struct RecordLocator {
    ignore: IgnoreSet,
}

impl RecordLocator {
    /// Create a locator whose decoder drops the given attributes.
    pub fn new(ignore: IgnoreSet) -> Self {
        Self { ignore }
    }

    /// Scan forward from `cursor` for the entry named `key`.
    ///
    /// Not finding the key is not an error. An entry whose body contains a
    /// malformed line is reported as not found. Only I/O failures are
    /// returned as errors.
    pub fn locate<R: BufRead + Seek>(
        &self,
        stream: &mut R,
        cursor: ScanCursor,
        key: &Key,
    ) -> ScanResult<LocateResult> {
        let mut reader = LineReader::at(stream, cursor)?;

        while let Some(found) = reader.next_key()? {
            if &found != key {
                continue;
            }

            return match self.decode_body(&mut reader, found) {
                Ok(record) => Ok(LocateResult {
                    record: Some(record),
                    cursor: reader.position(),
                }),
                Err(ScanError::MalformedLine { line, content }) => {
                    warn!(%key, line, %content, "skipping malformed entry");
                    Ok(LocateResult {
                        record: None,
                        cursor: reader.position(),
                    })
                }
                Err(e) => Err(e),
            };
        }

        Ok(LocateResult {
            record: None,
            cursor: reader.position(),
        })
    }

    /// Like [`locate`](Self::locate), but a miss from a non-zero cursor is
    /// retried once from the start of the stream.
    ///
    /// The two exports do not share a key order, so an entry may sit before
    /// the cursor even though the previous lookup succeeded.
    pub fn locate_with_retry<R: BufRead + Seek>(
        &self,
        stream: &mut R,
        cursor: ScanCursor,
        key: &Key,
    ) -> ScanResult<LocateResult> {
        let result = self.locate(stream, cursor, key)?;
        if result.is_found() || cursor.is_start() {
            return Ok(result);
        }
        debug!(%key, line = cursor.line, "not found after cursor, rescanning from start");
        self.locate(stream, ScanCursor::START, key)
    }

    fn decode_body<R: BufRead + Seek>(
        &self,
        reader: &mut LineReader<'_, R>,
        key: Key,
    ) -> ScanResult<Record> {
        let mut decoder = RecordDecoder::new(key, &self.ignore);
        while let Some(line) = reader.next_line()? {
            match decoder.feed(line.number, &line.text)? {
                Feed::Continue => {}
                Feed::Blank => break,
                Feed::NextKey => {
                    reader.push_back(line);
                    break;
                }
            }
        }
        Ok(decoder.finish())
    }
}

/// Scan forward from `cursor` for `key`, keeping every attribute.
pub fn locate_record<R: BufRead + Seek>(
    stream: &mut R,
    cursor: ScanCursor,
    key: &Key,
) -> ScanResult<LocateResult> {
    RecordLocator::default().locate(stream, cursor, key)
}
