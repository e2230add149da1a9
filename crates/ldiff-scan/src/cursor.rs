//! Explicit scan positions and the physical line reader behind every scan.

use std::io::{self, BufRead, Seek, SeekFrom};

use ldiff_types::Key;

use crate::decoder::{classify, continuation, LineKind};

/// A position in an export: the number of lines consumed so far plus the
/// byte offset of the same point, so a scan can resume with one seek.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanCursor {
    /// Lines consumed before this position.
    pub line: u64,
    /// Byte offset of this position.
    pub offset: u64,
}

impl ScanCursor {
    /// The start of the stream.
    pub const START: Self = Self { line: 0, offset: 0 };

    /// Create a cursor from explicit values.
    pub fn new(line: u64, offset: u64) -> Self {
        Self { line, offset }
    }

    /// Returns `true` if this is the start of the stream.
    pub fn is_start(&self) -> bool {
        *self == Self::START
    }
}

/// One physical line with its line ending stripped.
#[derive(Clone, Debug)]
pub(crate) struct Line {
    /// 1-based line number.
    pub number: u64,
    /// Position of the first byte of the line.
    pub start: ScanCursor,
    pub text: String,
}

/// Reads physical lines from a seekable stream, tracking the cursor.
///
/// Holds at most one pushed-back line so a scan can stop *before* a key line
/// that ends the previous entry.
pub(crate) struct LineReader<'a, R> {
    inner: &'a mut R,
    pos: ScanCursor,
    pending: Option<Line>,
    buf: Vec<u8>,
}

impl<'a, R: BufRead + Seek> LineReader<'a, R> {
    /// Position the stream at `cursor` and start reading there.
    pub fn at(inner: &'a mut R, cursor: ScanCursor) -> io::Result<Self> {
        inner.seek(SeekFrom::Start(cursor.offset))?;
        Ok(Self {
            inner,
            pos: cursor,
            pending: None,
            buf: Vec::new(),
        })
    }

    /// Position of the next unread line.
    pub fn position(&self) -> ScanCursor {
        self.pending.as_ref().map_or(self.pos, |line| line.start)
    }

    /// Return a line so the next call to [`next_line`](Self::next_line) yields it again.
    pub fn push_back(&mut self, line: Line) {
        debug_assert!(self.pending.is_none());
        self.pending = Some(line);
    }

    /// Read the next physical line, or `None` at end of stream.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn next_line(&mut self) -> io::Result<Option<Line>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }

        self.buf.clear();
        let read = self.inner.read_until(b'\n', &mut self.buf)?;
        if read == 0 {
            return Ok(None);
        }

        let start = self.pos;
        self.pos.line += 1;
        self.pos.offset += read as u64;

        let mut end = self.buf.len();
        if end > 0 && self.buf[end - 1] == b'\n' {
            end -= 1;
        }
        if end > 0 && self.buf[end - 1] == b'\r' {
            end -= 1;
        }

        Ok(Some(Line {
            number: self.pos.line,
            start,
            text: String::from_utf8_lossy(&self.buf[..end]).into_owned(),
        }))
    }

    /// Skip forward to the next key line and return its unwrapped key.
    ///
    /// Continuation lines following the key line are folded into the key.
    /// On return the reader sits on the first line after the key.
    pub fn next_key(&mut self) -> io::Result<Option<Key>> {
        while let Some(line) = self.next_line()? {
            if let LineKind::Key(value) = classify(&line.text) {
                let mut raw = value.to_string();
                while let Some(next) = self.next_line()? {
                    match continuation(&next.text) {
                        Some(rest) => raw.push_str(rest),
                        None => {
                            self.push_back(next);
                            break;
                        }
                    }
                }
                return Ok(Some(Key::new(&raw)));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn tracks_lines_and_offsets() {
        let mut stream = Cursor::new(b"ab\r\ncd\nef".to_vec());
        let mut reader = LineReader::at(&mut stream, ScanCursor::START).unwrap();

        let first = reader.next_line().unwrap().unwrap();
        assert_eq!(first.text, "ab");
        assert_eq!(first.number, 1);
        assert_eq!(reader.position(), ScanCursor::new(1, 4));

        let second = reader.next_line().unwrap().unwrap();
        assert_eq!(second.text, "cd");
        assert_eq!(second.start, ScanCursor::new(1, 4));

        let third = reader.next_line().unwrap().unwrap();
        assert_eq!(third.text, "ef");
        assert_eq!(reader.position(), ScanCursor::new(3, 9));
        assert!(reader.next_line().unwrap().is_none());
    }

    #[test]
    fn push_back_rewinds_position() {
        let mut stream = Cursor::new(b"one\ntwo\n".to_vec());
        let mut reader = LineReader::at(&mut stream, ScanCursor::START).unwrap();
        let line = reader.next_line().unwrap().unwrap();
        reader.push_back(line);
        assert!(reader.position().is_start());
        assert_eq!(reader.next_line().unwrap().unwrap().text, "one");
    }

    #[test]
    fn resumes_at_cursor() {
        let mut stream = Cursor::new(b"one\ntwo\n".to_vec());
        let mut reader = LineReader::at(&mut stream, ScanCursor::new(1, 4)).unwrap();
        let line = reader.next_line().unwrap().unwrap();
        assert_eq!(line.text, "two");
        assert_eq!(line.number, 2);
    }

    #[test]
    fn next_key_unwraps_continuations() {
        let text = "version: 1\n\ndn: cn=Very Long\n  Name,dc=example\ncn: x\n";
        let mut stream = Cursor::new(text.as_bytes().to_vec());
        let mut reader = LineReader::at(&mut stream, ScanCursor::START).unwrap();
        let key = reader.next_key().unwrap().unwrap();
        assert_eq!(key.as_str(), "cn=very long name,dc=example");
        assert_eq!(reader.next_line().unwrap().unwrap().text, "cn: x");
        assert!(reader.next_key().unwrap().is_none());
    }
}
