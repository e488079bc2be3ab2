//! Decoder for solution files of a solved game tree.
//!
//! This module provides [SolutionParser] to turn a solution file into a
//! [SolutionTree], or into a lazy [NodeStream] of its nodes in pre-order.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`decode_str`] / [`decode_bytes`] - decode in-memory content
//! * [`decode_file`] - decode a file (read strategy chosen by file size)
//! * [`stream_file`] - stream the nodes of a file
//!
//! # Full API
//! For more control, configure a [SolutionReaderBuilder], or a
//! [SolutionParser] and provide data via a
//! [ByteParser](crate::parser::ByteParser).
//!
//! # Format
//! * `file ::= header node`
//! * `header ::= n d NEWLINE`
//! * `node ::= fields ':' move* NEWLINE node*` (one `node` per listed move)
//! * `fields ::= result count size` (basic schema)
//! * `fields ::= result final proof disproof count size reason` (extended schema)
//!
//! Furthermore:
//! * All values are non-negative decimal integers separated by blanks
//! * `result` is 0 (X wins), 1 (O wins), 2 (draw) or 3 (unknown);
//!   `final` is 0 or 1
//! * `size` must equal the number of listed moves; moves of one line are
//!   distinct
//! * The schema is fixed by the first node line
//! * Blank lines between node lines are ignored, as is trailing whitespace
//!
//! The file carries no subtree lengths: a child's line directly follows its
//! parent's line (or its previous sibling's subtree), so one misread field
//! desynchronizes the rest of the file. Decoding therefore stops at the
//! first error.

mod builder;
mod defs;
mod parser;
mod stream;

pub use builder::{FileNodeStream, ReadStrategy, SolutionReaderBuilder};
pub use parser::SolutionParser;
pub use stream::{NodeStream, StreamedNode};

use crate::model::SolutionTree;
use crate::parser::{ByteParser, FormatError};
use std::path::Path;

// ============================================================================
// QUICK DECODING API (pub)
// ============================================================================
/// Decodes the content of a solution file given as string.
///
/// # Example
/// ```
/// use soltree::decoder::decode_str;
///
/// let tree = decode_str("3 2\n2 5 2 :0 4\n1 1 0 :\n2 1 0 :")?;
/// assert_eq!(tree.num_nodes(), 3);
/// assert_eq!(tree.root().count(), 5);
/// # Ok::<(), soltree::parser::FormatError>(())
/// ```
pub fn decode_str<S: AsRef<str>>(input: S) -> Result<SolutionTree, FormatError> {
    decode_bytes(input.as_ref().as_bytes())
}

/// Decodes the content of a solution file given as bytes.
pub fn decode_bytes(input: &[u8]) -> Result<SolutionTree, FormatError> {
    SolutionParser::new().decode(ByteParser::for_bytes(input))
}

/// Decodes a solution file with default settings.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Example
/// ```no_run
/// use soltree::decoder::decode_file;
///
/// let tree = decode_file("3x3.txt")?;
/// println!("{} positions, root is {}", tree.num_nodes(), tree.root().result());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<SolutionTree, FormatError> {
    SolutionReaderBuilder::for_file(path).build_tree()
}

/// Streams the nodes of a solution file through a buffered reader.
pub fn stream_file<P: AsRef<Path>>(path: P) -> Result<FileNodeStream, FormatError> {
    SolutionReaderBuilder::for_file(path)
        .with_buffered_source()
        .stream()
}
