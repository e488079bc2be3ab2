//! Low-level byte-by-byte parser for line-oriented ASCII text.
//!
//! This module provides [ByteParser] for parsing text-based record formats
//! with support for peeking, consuming, line tracking and unsigned integer
//! fields. Used as the foundation for the solution-file decoder and the
//! proof-number evolution reader.

use crate::parser::buffered_byte_source::BufferedByteSource;
use crate::parser::byte_source::ByteSource;
use crate::parser::format_error::{FormatError, FormatErrorKind};
use crate::parser::in_memory_byte_source::InMemoryByteSource;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default length of context provided by errors raised from the parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================$=
/// A byte-by-byte parser for line-oriented ASCII text.
///
/// [ByteParser] provides the parsing operations needed by whitespace
/// separated record formats. It operates on any [ByteSource] and assumes
/// ASCII encoding.
///
/// # Features
/// - Works with any [ByteSource] (in-memory or buffered)
/// - Tracks the 1-based line number of the current position
/// - Distinguishes blanks (space, tab) from line ends (`\n`, `\r\n`, `\r`)
/// - Parses unsigned decimal fields with overflow detection
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use soltree::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("3 2\n2 5 2 :0 4\n");
///
/// assert_eq!(parser.parse_unsigned().unwrap(), 3);
/// parser.skip_blanks();
/// assert_eq!(parser.parse_unsigned().unwrap(), 2);
/// assert!(parser.consume_line_end());
/// assert_eq!(parser.line(), 2);
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
    /// 1-based line number of the current position
    line: usize,
}

// ============================================================================
// Construction (pub)
// ============================================================================
impl ByteParser<InMemoryByteSource> {
    /// Creates a new [ByteParser] from a byte slice by copying it into a Vec.
    pub fn for_bytes(input: &[u8]) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.to_vec()))
    }

    /// Creates a new [ByteParser] from a string by copying it into a Vec.
    pub fn for_str(input: &str) -> Self {
        Self::for_bytes(input.as_bytes())
    }

    /// Creates a new [ByteParser] reading the whole file into memory.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read.
    pub fn from_file_in_memory<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::new(InMemoryByteSource::from_file(path)?))
    }
}

impl ByteParser<BufferedByteSource<File>> {
    /// Creates a new [ByteParser] streaming the file through a buffered reader.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be opened.
    pub fn from_file_buffered<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::new(BufferedByteSource::from_file(path)?))
    }
}

impl<R: Read> ByteParser<BufferedByteSource<R>> {
    /// Creates a new [ByteParser] streaming from any reader.
    pub fn from_reader(reader: R) -> Self {
        Self::new(BufferedByteSource::from_reader(reader))
    }
}

// ============================================================================
// Parsing primitives (pub)
// ============================================================================
impl<S: ByteSource> ByteParser<S> {
    /// Creates a new [ByteParser] from a byte source.
    pub fn new(source: S) -> Self {
        Self { source, line: 1 }
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&mut self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    ///
    /// Consuming a line end (`\n`, `\r\n` or a lone `\r`) advances the
    /// line counter once.
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.source.next_byte()?;
        match byte {
            b'\n' => self.line += 1,
            b'\r' if self.source.peek() != Some(b'\n') => self.line += 1,
            _ => {}
        }
        Some(byte)
    }

    /// Skips (consumes) all consecutive blanks: space (' ') and tab ('\t').
    ///
    /// Line ends are not skipped.
    pub fn skip_blanks(&mut self) {
        while let Some(b' ' | b'\t') = self.peek() {
            self.next_byte();
        }
    }

    /// Skips (consumes) all consecutive whitespace, including line ends.
    ///
    /// Whitespace includes: space (' '), tab ('\t'), newline ('\n'), and carriage return ('\r').
    pub fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.next_byte();
        }
    }

    /// Consumes the current byte if it matches the target byte.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Returns whether the current position is at a line end (`\n`, `\r`) or EOF.
    pub fn at_line_end(&mut self) -> bool {
        matches!(self.peek(), None | Some(b'\n' | b'\r'))
    }

    /// Consumes a line end (`\n`, `\r\n` or a lone `\r`).
    ///
    /// # Returns
    /// `true` if a line end was consumed or EOF was reached,
    /// `false` if some other byte is at the current position.
    pub fn consume_line_end(&mut self) -> bool {
        match self.peek() {
            None => true,
            Some(b'\n') => {
                self.next_byte();
                true
            }
            Some(b'\r') => {
                self.next_byte();
                self.consume_if(b'\n');
                true
            }
            Some(_) => false,
        }
    }

    /// Returns whether the current byte terminates a field:
    /// a blank, a line end, EOF, or the child-list separator `:`.
    pub fn at_field_end(&mut self) -> bool {
        matches!(
            self.peek(),
            None | Some(b' ' | b'\t' | b'\n' | b'\r' | b':')
        )
    }

    /// Parses an unsigned decimal integer starting at the current position.
    ///
    /// The number must be terminated by a blank, a line end, EOF or `:`;
    /// a token like `12a` is rejected as a whole.
    ///
    /// # Errors
    /// * [FormatErrorKind::InvalidInteger] - if the token is not a plain decimal number
    /// * [FormatErrorKind::NumberOutOfRange] - if the number does not fit into `u64`
    pub fn parse_unsigned(&mut self) -> Result<u64, FormatError> {
        let mut value: Option<u64> = Some(0);
        let mut token = String::new();

        while let Some(b) = self.peek() {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .and_then(|v| v.checked_mul(10))
                .and_then(|v| v.checked_add(u64::from(b - b'0')));
            token.push(char::from(b));
            self.next_byte();
        }

        if token.is_empty() || !self.at_field_end() {
            token.push_str(&self.parse_token());
            return Err(FormatError::from_parser(
                FormatErrorKind::InvalidInteger(token),
                self,
            ));
        }

        value.ok_or_else(|| FormatError::from_parser(FormatErrorKind::NumberOutOfRange(token), self))
    }

    /// Consumes and returns the bytes up to the next field end
    /// (see [at_field_end](Self::at_field_end)).
    pub fn parse_token(&mut self) -> String {
        let mut token = String::new();
        while !self.at_field_end() {
            if let Some(b) = self.next_byte() {
                token.push(char::from(b));
            }
        }
        token
    }

    /// Returns the 1-based line number of the current position.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the current parser position (byte offset) in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&mut self) -> bool {
        self.source.is_eof()
    }

    /// Takes the I/O error that ended the input early, if any.
    pub fn take_io_error(&mut self) -> Option<std::io::Error> {
        self.source.take_error()
    }

    /// Fails with [FormatErrorKind::Io] if the input ended because a read
    /// failed rather than at the real end of data.
    pub fn check_io(&mut self) -> Result<(), FormatError> {
        match self.take_io_error() {
            Some(err) => Err(FormatError::at_line(
                FormatErrorKind::Io(err.to_string()),
                self.line,
                String::new(),
            )),
            None => Ok(()),
        }
    }

    /// Returns the rest of the current line, up to `k` bytes, for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&mut self, k: usize) -> String {
        let bytes = self.source.peek_slice(k);
        let end = bytes
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
            .unwrap_or(bytes.len());
        String::from_utf8_lossy(&bytes[..end]).into_owned()
    }

    /// Returns the default-length error context, see
    /// [get_context_as_string](Self::get_context_as_string).
    pub(crate) fn error_context(&mut self) -> String {
        self.get_context_as_string(DEFAULT_CONTEXT_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_counter_follows_newlines() {
        let mut parser = ByteParser::for_str("a\nb\r\nc");
        assert_eq!(parser.line(), 1);
        parser.next_byte();
        assert!(parser.consume_line_end());
        assert_eq!(parser.line(), 2);
        parser.next_byte();
        assert!(parser.consume_line_end());
        assert_eq!(parser.line(), 3);
        assert_eq!(parser.next_byte(), Some(b'c'));
        assert!(parser.consume_line_end()); // EOF counts as line end
    }

    #[test]
    fn test_lone_carriage_return_ends_line() {
        let mut parser = ByteParser::for_str("a\rb\r\r\nc");
        parser.next_byte();
        assert!(parser.consume_line_end());
        assert_eq!(parser.line(), 2);
        parser.next_byte();
        parser.skip_whitespace();
        assert_eq!(parser.line(), 4);
        assert_eq!(parser.peek(), Some(b'c'));
    }

    #[test]
    fn test_parse_unsigned_rejects_mixed_token() {
        let mut parser = ByteParser::for_str("12a 3");
        let err = parser.parse_unsigned().unwrap_err();
        assert_eq!(err.kind(), &FormatErrorKind::InvalidInteger("12a".to_string()));
        assert_eq!(parser.peek(), Some(b' '));
    }

    #[test]
    fn test_parse_unsigned_overflow() {
        let mut parser = ByteParser::for_str("99999999999999999999999 ");
        let err = parser.parse_unsigned().unwrap_err();
        assert!(matches!(err.kind(), FormatErrorKind::NumberOutOfRange(_)));
    }

    #[test]
    fn test_context_stops_at_line_end() {
        let mut parser = ByteParser::for_str("2 5 x :0\n1 1 0 :");
        assert_eq!(parser.get_context_as_string(50), "2 5 x :0");
    }
}
