//! Basic low-level byte parsing functionality.
//!
//! This module provides the byte sources (in-memory and buffered), the
//! line-aware [ByteParser] built on top of them, and the [FormatError]
//! reported for malformed input.
pub(crate) mod buffered_byte_source;
pub mod byte_parser;
pub(crate) mod byte_source;
pub mod format_error;
pub(crate) mod in_memory_byte_source;

pub use buffered_byte_source::BufferedByteSource;
pub use byte_parser::ByteParser;
pub use byte_source::ByteSource;
pub use format_error::{FormatError, FormatErrorKind};
pub use in_memory_byte_source::InMemoryByteSource;
