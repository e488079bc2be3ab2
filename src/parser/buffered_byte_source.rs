//! Buffered reader implementation of byte source for parsing.
//!
//! This module provides [BufferedByteSource], which wraps any reader in a
//! [BufReader] for efficient streaming I/O. Use this for large solution files
//! where loading everything into memory would be impractical.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use crate::parser::byte_source::ByteSource;

// =#========================================================================#=
// BUFFERED BYTE SOURCE
// =#========================================================================$=
/// A buffered byte source for streaming large files (or any other reader).
///
/// Uses [BufReader] for efficient I/O. Peeking is restricted to the bytes
/// currently held in the reader's buffer, which is all the decoder needs:
/// it only ever looks at one byte ahead, plus a few bytes of error context.
///
/// A failed read ends the input: the first I/O error is kept and the source
/// behaves like EOF from then on. [ByteParser](crate::parser::ByteParser)
/// picks the error up via [ByteSource::take_error] and reports it as
/// [FormatErrorKind::Io](crate::parser::FormatErrorKind::Io).
pub struct BufferedByteSource<R: Read = File> {
    /// Underlying reader, handles getting chunks from the input
    reader: BufReader<R>,

    /// Current absolute position in the stream
    pos: usize,

    /// First read error, pending until taken
    error: Option<io::Error>,

    /// Set once a read has failed; the source stays at EOF afterwards
    failed: bool,
}

impl BufferedByteSource<File> {
    /// Creates a new buffered byte source from a file path.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<BufferedByteSource<File>> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> BufferedByteSource<R> {
    /// Creates a new buffered byte source reading from `reader`.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            pos: 0,
            error: None,
            failed: false,
        }
    }

    /// Returns the buffered bytes, or an empty slice once a read has failed.
    fn buffer(&mut self) -> &[u8] {
        if self.failed {
            return &[];
        }
        match self.reader.fill_buf() {
            Ok(buf) => buf,
            Err(err) => {
                self.failed = true;
                self.error = Some(err);
                &[]
            }
        }
    }
}

impl<R: Read> ByteSource for BufferedByteSource<R> {
    fn peek(&mut self) -> Option<u8> {
        self.buffer().first().copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.reader.consume(1);
        self.pos += 1;
        Some(byte)
    }

    fn peek_slice(&mut self, k: usize) -> &[u8] {
        let buf = self.buffer();
        &buf[..k.min(buf.len())]
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn is_eof(&mut self) -> bool {
        self.buffer().is_empty()
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

// =#========================================================================#=
// TESTS - BUFFERED BYTE SOURCE
// =#========================================================================$=
#[cfg(test)]
mod tests {
    use crate::decoder::SolutionParser;
    use crate::parser::buffered_byte_source::BufferedByteSource;
    use crate::parser::byte_parser::ByteParser;
    use crate::parser::byte_source::ByteSource;
    use crate::parser::format_error::FormatErrorKind;
    use std::io::{self, Read};

    /// Reader that hands out `data` and then fails.
    struct FailingReader {
        data: &'static [u8],
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::other("disk gone"));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_buffered_decode_fixture_file() {
        let source = BufferedByteSource::from_file("tests/fixtures/basic_3x3.txt").unwrap();
        let byte_parser = ByteParser::new(source);

        let tree = SolutionParser::new().decode(byte_parser).unwrap();
        assert_eq!(tree.extent(), 3);
        assert_eq!(tree.num_nodes(), 7);
    }

    #[test]
    fn test_buffered_reader_source() {
        let mut source = BufferedByteSource::from_reader(&b"3 2\n"[..]);
        assert_eq!(source.peek_slice(3), b"3 2");
        assert_eq!(source.next_byte(), Some(b'3'));
        assert_eq!(source.position(), 1);
        source.next_byte();
        source.next_byte();
        source.next_byte();
        assert!(source.is_eof());
        assert_eq!(source.peek(), None);
    }

    #[test]
    fn test_read_failure_is_kept_and_source_stops() {
        let mut source = BufferedByteSource::from_reader(FailingReader { data: b"3" });
        assert_eq!(source.next_byte(), Some(b'3'));
        assert_eq!(source.peek(), None);
        assert!(source.is_eof());
        assert_eq!(source.take_error().unwrap().to_string(), "disk gone");
        assert!(source.take_error().is_none());
        assert!(source.is_eof());
    }

    #[test]
    fn test_read_failure_mid_file_is_io_error() {
        let reader = FailingReader {
            data: b"3 2\n2 5 2 :0 4\n1 1 0 :\n",
        };
        let err = SolutionParser::new()
            .decode(ByteParser::from_reader(reader))
            .unwrap_err();
        assert_eq!(err.kind(), &FormatErrorKind::Io("disk gone".to_string()));
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn test_read_failure_after_last_node_is_io_error() {
        let reader = FailingReader {
            data: b"3 2\n2 5 2 :0 4\n1 1 0 :\n2 1 0 :\n",
        };
        let err = SolutionParser::new()
            .decode(ByteParser::from_reader(reader))
            .unwrap_err();
        assert!(matches!(err.kind(), FormatErrorKind::Io(_)));
    }
}
