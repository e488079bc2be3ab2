//! Data model of a decoded solution file.
//!
//! - [SolutionTree]: Arena of all nodes in pre-order, plus the file [Header]
//!   and [Schema]
//! - [Node] / [NodeRecord]: One game position with its stored statistics
//! - [LabelTable]: Display names for result and reason codes
//!
//! Nodes are referenced by [NodeIndex] and children by the [MoveIndex] that
//! leads to them; no node holds a reference to another.

/// Display names for integer codes
pub mod label_table;
/// Game positions and their stored statistics
pub mod node;
/// Solution tree structure and operations
pub mod tree;
pub(crate) mod tree_builder;

pub use label_table::LabelTable;
pub use node::{
    GameResult, MoveIndex, Node, NodeIndex, NodeRecord, ProofNumber, ReasonCode, SearchStats,
};
pub use tree::{Header, PreOrderIter, Schema, SolutionTree};
pub(crate) use tree_builder::TreeBuilder;
