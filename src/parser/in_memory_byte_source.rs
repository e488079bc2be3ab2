//! Byte source over a fully loaded solution file.
//!
//! The decoder reads each file in a single forward pass and only peeks
//! ahead for error context, so an owned buffer with a cursor
//! is all [InMemoryByteSource] needs. Peeking is never limited by buffer
//! boundaries, so error context always shows the rest of the offending
//! line.

use crate::parser::byte_source::ByteSource;
use std::fs;
use std::path::Path;

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================$=
/// Owned solution-file bytes and a read cursor.
///
/// Chosen by [ReadStrategy::Automatic](crate::decoder::ReadStrategy) for
/// files below the buffering threshold. Reading cannot fail once the file
/// is loaded, so [ByteSource::take_error] never reports anything.
pub struct InMemoryByteSource {
    input: Vec<u8>,
    /// Offset of the next unread byte
    pos: usize,
}

impl InMemoryByteSource {
    /// Takes ownership of `bytes`; decoding starts at offset 0.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            input: bytes,
            pos: 0,
        }
    }

    /// Loads the solution file at `path`. All I/O happens here, up front.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<InMemoryByteSource> {
        Ok(Self::from_vec(fs::read(path)?))
    }
}

impl ByteSource for InMemoryByteSource {
    #[inline(always)]
    fn peek(&mut self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    #[inline(always)]
    fn peek_slice(&mut self, k: usize) -> &[u8] {
        let end = (self.pos + k).min(self.input.len());
        &self.input[self.pos..end]
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn is_eof(&mut self) -> bool {
        self.pos >= self.input.len()
    }
}
