//! Assembly of a [SolutionTree] from nodes arriving in pre-order.
//!
//! The decoder yields one [StreamedNode] per node line. Each carries its
//! depth and the move leading to it, which is enough to link it to its
//! parent with an ancestor stack, without any recursion.

use crate::decoder::StreamedNode;
use crate::model::node::{Node, NodeIndex};
use crate::model::tree::{Header, Schema, SolutionTree};

// =#========================================================================#=
// TREE BUILDER
// =#========================================================================$=
/// Builds the arena of a [SolutionTree] from pre-order [StreamedNode]s.
///
/// `ancestors[k]` is the arena index of the most recent node at depth `k`;
/// a node at depth `k + 1` is always a child of `ancestors[k]`.
#[derive(Debug)]
pub(crate) struct TreeBuilder {
    header: Header,
    nodes: Vec<Node>,
    ancestors: Vec<NodeIndex>,
}

impl TreeBuilder {
    pub(crate) fn new(header: Header) -> Self {
        TreeBuilder {
            header,
            nodes: Vec::new(),
            ancestors: Vec::new(),
        }
    }

    /// Appends the next node in pre-order and links it to its parent.
    ///
    /// The caller guarantees pre-order: the first node has depth 0 and every
    /// later node has a depth between 1 and the previous depth plus one.
    pub(crate) fn add_node(&mut self, streamed: StreamedNode) -> NodeIndex {
        let StreamedNode {
            depth,
            incoming_move,
            record,
        } = streamed;
        debug_assert!(depth <= self.ancestors.len());

        self.ancestors.truncate(depth);
        let parent = self.ancestors.last().copied();
        let index = self.nodes.len();

        self.nodes.push(Node::new(record, depth, parent, incoming_move));
        if let Some(parent) = parent {
            self.nodes[parent].push_child(index);
        }
        self.ancestors.push(index);
        index
    }

    /// Returns the number of nodes added so far.
    pub(crate) fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Completes the tree with the schema detected by the decoder;
    /// `None` if no node was added or no schema is known.
    pub(crate) fn finish(self, schema: Option<Schema>) -> Option<SolutionTree> {
        let schema = schema?;
        if self.nodes.is_empty() {
            return None;
        }
        Some(SolutionTree::from_parts(self.header, schema, self.nodes))
    }
}
