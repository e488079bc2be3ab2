//! Node module for solved game-tree representation.
//!
//! A [NodeRecord] is the content of one node line of a solution file.
//! A [Node] is a record placed in the arena of a
//! [SolutionTree](crate::model::SolutionTree), i.e. additionally linked to
//! its parent and children.

use std::fmt;

/// Index of a node in a [SolutionTree](crate::model::SolutionTree) (arena).
pub type NodeIndex = usize;

/// Identifier of a board cell, in `[0, n^d)`; also identifies the move
/// that marks this cell.
pub type MoveIndex = usize;

/// Code of the reason a node's search terminated.
/// Display names live in an external [LabelTable](crate::model::LabelTable).
pub type ReasonCode = u32;

// =#========================================================================#=
// GAME RESULT
// =#========================================================================#=
/// Minimax result of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameResult {
    XWins,
    OWins,
    Draw,
    /// Search was cut off before the position was decided
    Unknown,
}

impl GameResult {
    /// Returns the result for an integer code (0 = X wins, 1 = O wins,
    /// 2 = draw, 3 = unknown), or `None` for any other code.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(GameResult::XWins),
            1 => Some(GameResult::OWins),
            2 => Some(GameResult::Draw),
            3 => Some(GameResult::Unknown),
            _ => None,
        }
    }

    /// Returns the integer code of this result as used in solution files.
    pub fn code(self) -> u8 {
        match self {
            GameResult::XWins => 0,
            GameResult::OWins => 1,
            GameResult::Draw => 2,
            GameResult::Unknown => 3,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameResult::XWins => write!(f, "X wins"),
            GameResult::OWins => write!(f, "O wins"),
            GameResult::Draw => write!(f, "Draw"),
            GameResult::Unknown => write!(f, "Unknown"),
        }
    }
}

// =#========================================================================#=
// PROOF NUMBER
// =#========================================================================#=
/// Proof or disproof number of a node.
///
/// The value [ProofNumber::INFINITE] is a sentinel for unbounded effort.
/// It is kept as a plain integer so that it round-trips unchanged;
/// rendering it as `∞` is up to presentation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProofNumber(u64);

impl ProofNumber {
    /// Sentinel value denoting an infinite proof or disproof number.
    pub const INFINITE: ProofNumber = ProofNumber(1_000_000);

    pub fn new(value: u64) -> Self {
        ProofNumber(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn is_infinite(self) -> bool {
        self == Self::INFINITE
    }
}

impl fmt::Display for ProofNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =#========================================================================#=
// SEARCH STATS
// =#========================================================================#=
/// Solver bookkeeping stored only by the extended schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub is_final: bool,
    pub proof: ProofNumber,
    pub disproof: ProofNumber,
    pub reason: ReasonCode,
}

// =#========================================================================#=
// NODE RECORD
// =#========================================================================$=
/// Content of one node line: the stored statistics of a position and the
/// moves leading to its children, in file order.
///
/// All values are passed through verbatim; nothing (in particular `count`)
/// is recomputed from the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    /// Minimax result of the position
    pub result: GameResult,
    /// Number of positions in the subtree, as counted by the solver
    pub count: u64,
    /// Extended-schema fields; `None` for basic-schema files
    pub search: Option<SearchStats>,
    /// Child moves in file order; no duplicates
    pub moves: Vec<MoveIndex>,
}

impl NodeRecord {
    /// Returns the number of children listed for this node.
    pub fn num_children(&self) -> usize {
        self.moves.len()
    }

    /// Returns the reason code, if this record stems from an extended-schema file.
    pub fn reason(&self) -> Option<ReasonCode> {
        self.search.map(|s| s.reason)
    }
}

// =#========================================================================#=
// NODE
// =#========================================================================$=
/// A [NodeRecord] placed in the arena of a
/// [SolutionTree](crate::model::SolutionTree).
///
/// # Invariants
/// - `children[i]` is the arena index of the child reached by `record.moves[i]`
/// - The root has no parent, no incoming move and depth 0
/// - Every other node has exactly one parent; there is no sharing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    record: NodeRecord,
    depth: usize,
    parent: Option<NodeIndex>,
    incoming_move: Option<MoveIndex>,
    children: Vec<NodeIndex>,
}

impl Node {
    /// Creates a node without children links; used during tree construction.
    pub(crate) fn new(
        record: NodeRecord,
        depth: usize,
        parent: Option<NodeIndex>,
        incoming_move: Option<MoveIndex>,
    ) -> Self {
        let capacity = record.moves.len();
        Node {
            record,
            depth,
            parent,
            incoming_move,
            children: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push_child(&mut self, child: NodeIndex) {
        self.children.push(child);
    }

    /// Returns the underlying record.
    pub fn record(&self) -> &NodeRecord {
        &self.record
    }

    pub fn result(&self) -> GameResult {
        self.record.result
    }

    pub fn count(&self) -> u64 {
        self.record.count
    }

    /// Returns the extended-schema statistics, if present.
    pub fn search(&self) -> Option<&SearchStats> {
        self.record.search.as_ref()
    }

    /// Returns the finality flag; `false` for basic-schema nodes.
    pub fn is_final(&self) -> bool {
        self.record.search.is_some_and(|s| s.is_final)
    }

    pub fn proof(&self) -> Option<ProofNumber> {
        self.record.search.map(|s| s.proof)
    }

    pub fn disproof(&self) -> Option<ProofNumber> {
        self.record.search.map(|s| s.disproof)
    }

    pub fn reason(&self) -> Option<ReasonCode> {
        self.record.reason()
    }

    /// Returns the child moves in file order.
    pub fn moves(&self) -> &[MoveIndex] {
        &self.record.moves
    }

    /// Returns the arena indices of the children, parallel to [moves](Self::moves).
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Returns the arena index of the child reached by `mv`, if there is one.
    pub fn child(&self, mv: MoveIndex) -> Option<NodeIndex> {
        self.record
            .moves
            .iter()
            .position(|&m| m == mv)
            .and_then(|i| self.children.get(i).copied())
    }

    pub fn num_children(&self) -> usize {
        self.record.moves.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.record.moves.is_empty()
    }

    /// Returns the depth (number of plies from the root).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the arena index of the parent, `None` for the root.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Returns the move that led from the parent to this node, `None` for the root.
    pub fn incoming_move(&self) -> Option<MoveIndex> {
        self.incoming_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_codes() {
        for code in 0..4 {
            let result = GameResult::from_code(code).unwrap();
            assert_eq!(u64::from(result.code()), code);
        }
        assert_eq!(GameResult::from_code(4), None);
        assert_eq!(GameResult::OWins.to_string(), "O wins");
    }

    #[test]
    fn test_proof_number_sentinel() {
        assert!(ProofNumber::new(1_000_000).is_infinite());
        assert!(!ProofNumber::new(999_999).is_infinite());
        assert_eq!(ProofNumber::INFINITE.to_string(), "1000000");
    }

    #[test]
    fn test_child_lookup_follows_move_order() {
        let record = NodeRecord {
            result: GameResult::Draw,
            count: 5,
            search: None,
            moves: vec![4, 0],
        };
        let mut node = Node::new(record, 0, None, None);
        node.push_child(1);
        node.push_child(2);

        assert_eq!(node.child(4), Some(1));
        assert_eq!(node.child(0), Some(2));
        assert_eq!(node.child(7), None);
        assert!(!node.is_final());
        assert_eq!(node.reason(), None);
    }
}
