//! Error types for decoding solution files.
//!
//! This module provides [FormatError] and [FormatErrorKind] for representing
//! and reporting malformed or truncated input. Every error carries the
//! 1-based line number of the offending line and, where available, a
//! snippet of that line.

use crate::model::MoveIndex;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use thiserror::Error;

// =#========================================================================#=
// FORMAT ERROR KIND
// =#========================================================================#=
/// Kinds of errors that can occur while decoding a solution file
/// (or a proof-number evolution log).
#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum FormatErrorKind {
    #[error("I/O error - {0}")]
    Io(String),

    #[error("Invalid header - {0}")]
    InvalidHeader(String),

    #[error("Expected {expected} fields before ':' but found {found}")]
    FieldCount { expected: String, found: usize },

    #[error("Expected non-negative integer but found {0:?}")]
    InvalidInteger(String),

    #[error("Number {0} out of range")]
    NumberOutOfRange(String),

    #[error("Missing ':' before child list")]
    MissingChildSeparator,

    #[error("Declared {declared} children but listed {found}")]
    ChildCountMismatch { declared: usize, found: usize },

    #[error("Invalid result code {0} (expected 0-3)")]
    InvalidResult(u64),

    #[error("Invalid final flag {0} (expected 0 or 1)")]
    InvalidFlag(u64),

    #[error("Move {0} listed twice in one child list")]
    DuplicateMove(MoveIndex),

    #[error("Unexpected end of file")]
    UnexpectedEof,

    #[error("Unexpected content after the last node")]
    TrailingContent,
}

// =#========================================================================#=
// FORMAT ERROR
// =#========================================================================$=
/// Decoding error with the line it occurred on and a snippet of that line.
///
/// A [FormatError] is terminal: a malformed file yields no tree and a
/// stream that produced an error yields nothing afterwards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at line {line}{}", context_suffix(.context))]
pub struct FormatError {
    kind: FormatErrorKind,
    line: usize,
    context: String,
}

fn context_suffix(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  Context (next {} bytes): {}", context.len(), context)
    }
}

impl FormatError {
    /// Create a [FormatError] at the parser's current line, with the
    /// remainder of that line as context.
    ///
    /// If a read failed, the input ended early and `kind` is only a symptom;
    /// the I/O error is reported instead.
    pub fn from_parser<S: ByteSource>(kind: FormatErrorKind, parser: &mut ByteParser<S>) -> Self {
        if let Some(err) = parser.take_io_error() {
            return Self::at_line(FormatErrorKind::Io(err.to_string()), parser.line(), String::new());
        }
        Self {
            kind,
            line: parser.line(),
            context: parser.error_context(),
        }
    }

    /// Create a [FormatError] for an explicitly given line,
    /// e.g. when the parser has already moved past the offending line.
    pub fn at_line(kind: FormatErrorKind, line: usize, context: String) -> Self {
        Self {
            kind,
            line,
            context,
        }
    }

    /// Convenience constructor for UnexpectedEof
    pub fn unexpected_eof<S: ByteSource>(parser: &mut ByteParser<S>) -> Self {
        Self::from_parser(FormatErrorKind::UnexpectedEof, parser)
    }

    /// Convenience constructor for InvalidHeader
    pub fn invalid_header<S: ByteSource>(parser: &mut ByteParser<S>, msg: &str) -> Self {
        Self::from_parser(FormatErrorKind::InvalidHeader(msg.to_string()), parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &FormatErrorKind {
        &self.kind
    }

    /// Get the 1-based line number the error occurred on;
    /// 0 for I/O errors raised before any input was read.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the snippet of the offending line (may be empty)
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        FormatError {
            kind: FormatErrorKind::Io(err.to_string()),
            line: 0,
            context: String::new(),
        }
    }
}
