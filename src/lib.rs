//! Soltree is a library to read the solution trees written by an exhaustive
//! proof-number solver for tic-tac-toe style games on `n×n` and `n×n×n`
//! boards.
//!
//! A solution file stores one line per game position, in pre-order, with
//! the minimax result, the solver's node count, optionally proof-number
//! statistics, and the moves leading to the child positions.
//! Core functionality provided:
//! - Decoder: turn a solution file into a [SolutionTree], or stream its
//!   nodes one by one for files too large to materialize
//!   (see [crate::decoder]).
//! - Path resolution: find the node addressed by a sequence of moves and
//!   reconstruct the board at that point (see [resolve]).
//! - Traversal: branching statistics and histograms as folds over a tree
//!   or a node stream (see [crate::traversal]).
//! - Writer: serialize a tree back into the file format
//!   (see [crate::writer]).
//! - Label tables and proof-number evolution logs as used by the
//!   solver's auxiliary tools.
//!
//! Limitations:
//! - Trees are read-only; there is no API to modify a decoded tree
//! - Move indices are not checked against the board size
//!
//! # Usage patterns
//! 1. Several functions provide quick access with default settings:
//!    [decode_str], [decode_file], [stream_file].
//! 2. Configure a
//!    [SolutionReaderBuilder](crate::decoder::SolutionReaderBuilder) for
//!    control over the read strategy and expected schema.
//!
//! ## Example
//!
//! Decode a file and inspect a position:
//! ```
//! use soltree::{decode_str, resolve};
//! use soltree::board::Player;
//! use soltree::model::GameResult;
//!
//! let tree = decode_str("3 2\n2 5 2 :0 4\n1 1 0 :\n2 1 0 :")?;
//! assert_eq!(tree.root().result(), GameResult::Draw);
//!
//! let position = resolve(&tree, &[4])?;
//! assert_eq!(position.board.occupant(4), Some(Player::X));
//! assert_eq!(position.board.to_move(), Player::O);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Aggregate a large file without materializing it:
//! ```no_run
//! use soltree::stream_file;
//! use soltree::traversal::{accumulate_stream, BranchingStats};
//!
//! let stats = accumulate_stream(stream_file("4x4.txt")?, BranchingStats::new())?;
//! print!("{stats}");
//! # Ok::<(), soltree::parser::FormatError>(())
//! ```

pub mod board;
pub mod decoder;
pub mod evolution;
pub mod model;
pub mod parser;
pub mod resolve;
pub mod traversal;
pub mod writer;

pub use decoder::{decode_bytes, decode_file, decode_str, stream_file};
pub use model::SolutionTree;
pub use parser::FormatError;
pub use resolve::{PathError, Resolution, parse_move_path, resolve, resolve_longest_prefix};
