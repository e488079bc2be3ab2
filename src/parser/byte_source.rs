//! Byte source abstractions for parsing.
//!
//! This module provides the [ByteSource] trait, implemented by
//! [InMemoryByteSource](crate::parser::InMemoryByteSource) and
//! [BufferedByteSource](crate::parser::BufferedByteSource).

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================T=
/// Trait defining the interface for different byte sources used by
/// [ByteParser](crate::parser::ByteParser).
///
/// This trait abstracts over different ways of accessing byte data:
/// - An owned in-memory buffer (`Vec<u8>`)
/// - Buffered reading from any reader (`BufReader<R>`)
///
/// By using this trait, the same decoder logic works with small solution
/// files loaded entirely into memory as well as huge files streamed from disk.
///
/// Sources only ever move forward: a solution file is decoded in one pass.
pub trait ByteSource {
    /// Peek at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn peek(&mut self) -> Option<u8>;

    /// Get the current byte and advance the position (consume it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn next_byte(&mut self) -> Option<u8>;

    /// Returns a slice of up to `k` bytes from the current position
    /// without consuming them.
    ///
    /// Buffered sources may return fewer than `k` bytes even before EOF,
    /// namely when the requested bytes are not in the current buffer.
    fn peek_slice(&mut self, k: usize) -> &[u8];

    /// Returns the current position (byte offset) in the byte stream.
    fn position(&self) -> usize;

    /// Check if at end of data.
    ///
    /// # Returns
    /// `true` if at or beyond the end of data, `false` otherwise
    fn is_eof(&mut self) -> bool;

    /// Takes the I/O error that ended the input early, if any.
    ///
    /// Sources report a failed read as EOF; this tells the two apart.
    fn take_error(&mut self) -> Option<std::io::Error> {
        None
    }
}
