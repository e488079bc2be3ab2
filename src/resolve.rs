//! Resolution of move paths against a [SolutionTree].
//!
//! A move path is the sequence of moves played from the initial position.
//! Resolving it walks the parent-to-child links from the root and
//! reconstructs the [BoardState] of the addressed position.

use crate::board::BoardState;
use crate::model::{MoveIndex, Node, NodeIndex, SolutionTree};
use thiserror::Error;

/// Separator of moves in a textual move path (`"0/4/"`)
const PATH_SEPARATOR: char = '/';

// =#========================================================================#=
// PATH ERROR
// =#========================================================================#=
/// Errors raised when a move path does not address a node.
///
/// Unlike a [FormatError](crate::parser::FormatError), a [PathError] only
/// concerns the request; callers may fall back to the deepest valid prefix,
/// see [resolve_longest_prefix].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Unknown move {mv} at depth {depth}")]
    UnknownMove { depth: usize, mv: MoveIndex },

    #[error("Malformed move {token:?} in move path")]
    MalformedPath { token: String },
}

// =#========================================================================#=
// RESOLUTION
// =#========================================================================$=
/// The node addressed by a move path together with its board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// Arena index of the addressed node
    pub index: NodeIndex,
    pub node: &'a Node,
    /// Cells occupied after playing the path
    pub board: BoardState,
}

/// Resolves `path` from the root of `tree`.
///
/// The empty path resolves to the root on the empty board. Resolution is
/// deterministic and has no side effects.
///
/// # Errors
/// Returns [PathError::UnknownMove] for the first move that is not a child
/// of the node reached so far.
///
/// # Example
/// ```
/// use soltree::{decode_str, resolve};
/// use soltree::model::GameResult;
///
/// let tree = decode_str("3 2\n2 5 2 :0 4\n1 1 0 :\n2 1 0 :")?;
/// let leaf = resolve(&tree, &[0])?;
///
/// assert_eq!(leaf.node.result(), GameResult::OWins);
/// assert!(leaf.board.x_cells().contains(&0));
/// assert!(leaf.board.o_cells().is_empty());
/// assert!(resolve(&tree, &[7]).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn resolve<'a>(tree: &'a SolutionTree, path: &[MoveIndex]) -> Result<Resolution<'a>, PathError> {
    let mut index = tree.root_index();
    for (depth, &mv) in path.iter().enumerate() {
        index = tree
            .child(index, mv)
            .ok_or(PathError::UnknownMove { depth, mv })?;
    }
    Ok(Resolution {
        index,
        node: &tree[index],
        board: BoardState::from_path(path),
    })
}

/// Resolves the longest valid prefix of `path`.
///
/// # Returns
/// The resolution of the prefix and its length, i.e. the number of moves
/// of `path` that were followed.
pub fn resolve_longest_prefix<'a>(
    tree: &'a SolutionTree,
    path: &[MoveIndex],
) -> (Resolution<'a>, usize) {
    let mut index = tree.root_index();
    let mut consumed = 0;
    for &mv in path {
        match tree.child(index, mv) {
            Some(child) => {
                index = child;
                consumed += 1;
            }
            None => break,
        }
    }
    let resolution = Resolution {
        index,
        node: &tree[index],
        board: BoardState::from_path(&path[..consumed]),
    };
    (resolution, consumed)
}

/// Parses a textual move path such as `"0/4/"` into `[0, 4]`.
///
/// Empty segments are ignored, so leading, trailing and doubled
/// separators are accepted.
///
/// # Errors
/// Returns [PathError::MalformedPath] for a segment that is not a
/// non-negative integer.
pub fn parse_move_path(path: &str) -> Result<Vec<MoveIndex>, PathError> {
    path.split(PATH_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment.parse().map_err(|_| PathError::MalformedPath {
                token: segment.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_path() {
        assert_eq!(parse_move_path("0/4/").unwrap(), vec![0, 4]);
        assert_eq!(parse_move_path("/12//3").unwrap(), vec![12, 3]);
        assert!(parse_move_path("").unwrap().is_empty());
        assert_eq!(
            parse_move_path("0/x/").unwrap_err(),
            PathError::MalformedPath {
                token: "x".to_string()
            }
        );
        assert!(parse_move_path("-1").is_err());
    }

    #[test]
    fn test_error_display() {
        let err = PathError::UnknownMove { depth: 2, mv: 7 };
        assert_eq!(err.to_string(), "Unknown move 7 at depth 2");
    }
}
