use std::io::{self, BufReader, Read};

use tracing::warn;

/// Single-byte reader with a one-byte lookahead.
pub trait ByteSource {
    /// Read the next byte, or `None` at end of data.
    fn next_byte(&mut self) -> Option<u8>;

    /// The byte returned by the most recent [`next_byte`](Self::next_byte).
    ///
    /// `None` before the first read and after end of data.
    fn last_byte(&self) -> Option<u8>;

    /// Whether a read has already hit end of data.
    fn at_end(&self) -> bool;
}

/// Tracks the lookahead shared by every source.
#[derive(Debug, Clone, Copy, Default)]
struct Lookahead {
    last: Option<u8>,
    ended: bool,
}

impl Lookahead {
    fn record(&mut self, byte: Option<u8>) -> Option<u8> {
        self.last = byte;
        self.ended = byte.is_none();
        byte
    }
}

/// Source over an in-memory command string.
#[derive(Debug, Clone)]
pub struct TextSource<'a> {
    bytes: &'a [u8],
    pos: usize,
    lookahead: Lookahead,
}

impl<'a> TextSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            lookahead: Lookahead::default(),
        }
    }
}

impl ByteSource for TextSource<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.bytes.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        self.lookahead.record(byte)
    }

    fn last_byte(&self) -> Option<u8> {
        self.lookahead.last
    }

    fn at_end(&self) -> bool {
        self.lookahead.ended
    }
}

/// Buffered source over a reader (stdin or an open file).
///
/// A read error other than interruption ends the data. The first such error
/// is kept for [`take_error`](Self::take_error).
pub struct ReaderSource<R: Read> {
    bytes: io::Bytes<BufReader<R>>,
    lookahead: Lookahead,
    error: Option<io::Error>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            lookahead: Lookahead::default(),
            error: None,
        }
    }

    /// The read error that ended the data, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn next_byte(&mut self) -> Option<u8> {
        let byte = loop {
            match self.bytes.next() {
                Some(Ok(b)) => break Some(b),
                Some(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Some(Err(e)) => {
                    warn!("Read failed, treating as end of data: {}", e);
                    self.error.get_or_insert(e);
                    break None;
                }
                None => break None,
            }
        };
        self.lookahead.record(byte)
    }

    fn last_byte(&self) -> Option<u8> {
        self.lookahead.last
    }

    fn at_end(&self) -> bool {
        self.lookahead.ended
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Reader that yields `data` and then fails every read.
    pub(crate) struct FailingReader {
        pub(crate) data: Vec<u8>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::other("device error"));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data.drain(..n);
            Ok(n)
        }
    }

    #[test]
    fn test_reader_source_keeps_read_error() {
        let mut src = ReaderSource::new(FailingReader { data: vec![0x41] });
        assert_eq!(src.next_byte(), Some(0x41));
        assert_eq!(src.next_byte(), None);
        assert!(src.at_end());

        let err = src.take_error().unwrap();
        assert_eq!(err.to_string(), "device error");
        assert!(src.take_error().is_none());
    }

    #[test]
    fn test_reader_source_clean_end_has_no_error() {
        let data: &[u8] = b"x";
        let mut src = ReaderSource::new(data);
        src.next_byte();
        src.next_byte();
        assert!(src.take_error().is_none());
    }

    #[test]
    fn test_text_source_reads_in_order() {
        let mut src = TextSource::new("ab");
        assert_eq!(src.last_byte(), None);
        assert!(!src.at_end());

        assert_eq!(src.next_byte(), Some(b'a'));
        assert_eq!(src.last_byte(), Some(b'a'));
        assert_eq!(src.next_byte(), Some(b'b'));
        assert_eq!(src.next_byte(), None);
        assert_eq!(src.last_byte(), None);
        assert!(src.at_end());
    }

    #[test]
    fn test_text_source_stays_at_end() {
        let mut src = TextSource::new("");
        assert_eq!(src.next_byte(), None);
        assert_eq!(src.next_byte(), None);
        assert!(src.at_end());
    }

    #[test]
    fn test_reader_source_over_slice() {
        let data: &[u8] = &[0x00, 0xFF, 0x41];
        let mut src = ReaderSource::new(data);
        assert_eq!(src.next_byte(), Some(0x00));
        assert_eq!(src.next_byte(), Some(0xFF));
        assert_eq!(src.next_byte(), Some(0x41));
        assert_eq!(src.last_byte(), Some(0x41));
        assert!(!src.at_end());
        assert_eq!(src.next_byte(), None);
        assert!(src.at_end());
    }
}
