//! Reader capabilities: sequential key-byte sources for the automaton.
//!
//! A reader is handed over positioned at the first byte of a JSON object
//! key, just past the opening `"`. It yields the key's bytes one at a time
//! and reports end-of-key by returning `None` once it reaches the
//! terminating `"` (which it consumes). Two capabilities exist: a generic
//! [`std::io::Read`]-backed streaming reader, and a borrowed-slice cursor
//! for the hot deserialization path. Both feed the same automaton and are
//! behaviorally equivalent for matching.

use std::io::{ErrorKind, Read};

/// Terminating delimiter of a JSON object key.
const KEY_DELIMITER: u8 = b'"';

/// Sequential source of key bytes.
///
/// A single reader instance is owned by one lookup call at a time; the
/// matcher never shares it across threads.
pub trait KeyReader {
    /// The next byte of the key, or `None` once the key has ended.
    ///
    /// After the first `None` every subsequent call returns `None`.
    fn next_key_byte(&mut self) -> Option<u8>;
}

/// Streaming reader over any [`Read`] implementation.
///
/// Reads one byte at a time, which keeps it allocation-free but pays the
/// `Read` dispatch cost per byte. Interrupted reads are retried per the
/// [`Read`] contract; any other I/O error ends the key, and the enclosing
/// deserializer, which owns the underlying reader, observes the failure on
/// its next read (matching itself never errors).
#[derive(Debug)]
pub struct StreamKeyReader<R: Read> {
    inner: R,
    finished: bool,
}

impl<R: Read> StreamKeyReader<R> {
    /// Wrap a reader positioned at the first byte of a key.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            finished: false,
        }
    }

    /// Consume the wrapper, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> KeyReader for StreamKeyReader<R> {
    fn next_key_byte(&mut self) -> Option<u8> {
        if self.finished {
            return None;
        }
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(1) if byte[0] != KEY_DELIMITER => return Some(byte[0]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                _ => {
                    self.finished = true;
                    return None;
                }
            }
        }
    }
}

/// Cursor reader over a borrowed byte slice; the low-overhead capability
/// used when the input is already buffered in memory.
#[derive(Debug)]
pub struct SliceKeyReader<'a> {
    input: &'a [u8],
    pos: usize,
    finished: bool,
}

impl<'a> SliceKeyReader<'a> {
    /// Wrap a slice whose first byte is the first byte of a key.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            finished: false,
        }
    }

    /// The unread remainder of the input, past the consumed key.
    pub fn remainder(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }
}

impl<'a> KeyReader for SliceKeyReader<'a> {
    #[inline]
    fn next_key_byte(&mut self) -> Option<u8> {
        if self.finished {
            return None;
        }
        match self.input.get(self.pos) {
            Some(&byte) if byte != KEY_DELIMITER => {
                self.pos += 1;
                Some(byte)
            }
            Some(_) => {
                // Consume the delimiter so the remainder starts after it.
                self.pos += 1;
                self.finished = true;
                None
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Delivers a slice one byte at a time, failing with `Interrupted`
    /// exactly once before the byte at `interrupt_at`.
    struct InterruptingReader<'a> {
        input: &'a [u8],
        pos: usize,
        interrupt_at: usize,
        interrupted: bool,
    }

    impl<'a> InterruptingReader<'a> {
        fn new(input: &'a [u8], interrupt_at: usize) -> Self {
            Self {
                input,
                pos: 0,
                interrupt_at,
                interrupted: false,
            }
        }
    }

    impl Read for InterruptingReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted && self.pos == self.interrupt_at {
                self.interrupted = true;
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            match self.input.get(self.pos) {
                Some(&byte) if !buf.is_empty() => {
                    buf[0] = byte;
                    self.pos += 1;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    fn drain<R: KeyReader>(reader: &mut R) -> Vec<u8> {
        let mut bytes = Vec::new();
        while let Some(b) = reader.next_key_byte() {
            bytes.push(b);
        }
        bytes
    }

    #[test]
    fn test_slice_reader_stops_at_delimiter() {
        let mut reader = SliceKeyReader::new(b"Id\": 12");
        assert_eq!(drain(&mut reader), b"Id");
        assert_eq!(reader.remainder(), b": 12");
    }

    #[test]
    fn test_slice_reader_handles_unterminated_input() {
        let mut reader = SliceKeyReader::new(b"Id");
        assert_eq!(drain(&mut reader), b"Id");
        assert_eq!(reader.remainder(), b"");
        assert_eq!(reader.next_key_byte(), None);
    }

    #[test]
    fn test_stream_reader_stops_at_delimiter() {
        let mut reader = StreamKeyReader::new(&b"Name\":null"[..]);
        assert_eq!(drain(&mut reader), b"Name");
        // Stays finished even though more input follows.
        assert_eq!(reader.next_key_byte(), None);
    }

    #[test]
    fn test_stream_reader_ends_on_eof() {
        let mut reader = StreamKeyReader::new(&b"Na"[..]);
        assert_eq!(drain(&mut reader), b"Na");
        assert_eq!(reader.next_key_byte(), None);
    }

    #[test]
    fn test_stream_reader_retries_interrupted_reads() {
        let mut reader = StreamKeyReader::new(InterruptingReader::new(b"Id\": 1", 1));
        assert_eq!(drain(&mut reader), b"Id");
        assert_eq!(reader.next_key_byte(), None);
    }

    #[test]
    fn test_stream_reader_ends_key_on_persistent_error() {
        struct BrokenReader;
        impl Read for BrokenReader {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::from(ErrorKind::BrokenPipe))
            }
        }

        let mut reader = StreamKeyReader::new(BrokenReader);
        assert_eq!(reader.next_key_byte(), None);
        assert_eq!(reader.next_key_byte(), None);
    }

    #[test]
    fn test_readers_agree_on_content() {
        let input = b"Total\",";
        let from_stream = drain(&mut StreamKeyReader::new(&input[..]));
        let from_slice = drain(&mut SliceKeyReader::new(input));
        assert_eq!(from_stream, from_slice);
    }
}
