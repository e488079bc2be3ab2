//! Tree module for solved game-tree representation.
//!
//! Provides the core data structures of a decoded solution file:
//! * [SolutionTree] - Main tree structure using the arena pattern
//! * [Header] - Board extent and dimensionality from the first line
//! * [Schema] - Which node-line layout the file uses

use crate::board::BoardGeometry;
use crate::model::node::{MoveIndex, Node, NodeIndex};

/// Arena index of the root; nodes are stored in pre-order.
const ROOT_INDEX: NodeIndex = 0;

// =#========================================================================#=
// HEADER & SCHEMA
// =#========================================================================#=
/// First line of a solution file: board extent `n` and dimensionality `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Cells per edge (`n`)
    pub extent: usize,
    /// Board dimensionality (`d`), 2 or 3
    pub dimension: usize,
}

/// Node-line layout of a solution file, decided once by the first node line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// `result count size :children`
    Basic,
    /// `result final proof disproof count size reason :children`
    Extended,
}

impl Schema {
    /// Returns the number of fields before the `:` separator.
    pub fn field_count(self) -> usize {
        match self {
            Schema::Basic => 3,
            Schema::Extended => 7,
        }
    }

    /// Returns the schema with the given field count, if any.
    pub fn from_field_count(count: usize) -> Option<Self> {
        match count {
            3 => Some(Schema::Basic),
            7 => Some(Schema::Extended),
            _ => None,
        }
    }
}

// =#========================================================================#=
// SOLUTION TREE
// =#========================================================================#=
/// A solved game tree represented using the arena pattern on [Node].
///
/// Nodes are stored in a contiguous vector, in the pre-order in which they
/// appear in the solution file, and referenced by [NodeIndex]. The root is
/// at index 0. Arena storage keeps traversal and dropping free of recursion,
/// which matters for trees as deep as the board has cells.
///
/// # Structure
/// - Every node except the root has exactly one parent (strict tree)
/// - Children are linked in the order their moves are listed in the file
/// - The tree is immutable once built; it is obtained by decoding a
///   solution file (see [crate::decoder])
///
/// # Example
/// ```
/// use soltree::decode_str;
///
/// let tree = decode_str("3 2\n2 5 2 :0 4\n1 1 0 :\n2 1 0 :\n").unwrap();
/// assert_eq!(tree.num_nodes(), 3);
///
/// let child = tree.child(tree.root_index(), 4).unwrap();
/// assert_eq!(tree[child].count(), 1);
/// assert_eq!(tree.move_path(child), vec![4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionTree {
    header: Header,
    schema: Schema,
    /// Nodes of this tree in pre-order (arena pattern)
    nodes: Vec<Node>,
}

// ============================================================================
// Construction (crate)
// ============================================================================
impl SolutionTree {
    /// Wraps a completed pre-order arena; `nodes` must not be empty.
    pub(crate) fn from_parts(header: Header, schema: Schema, nodes: Vec<Node>) -> Self {
        debug_assert!(!nodes.is_empty());
        SolutionTree {
            header,
            schema,
            nodes,
        }
    }
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl SolutionTree {
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns the number of cells per board edge (`n`).
    pub fn extent(&self) -> usize {
        self.header.extent
    }

    /// Returns the board dimensionality (`d`).
    pub fn dimension(&self) -> usize {
        self.header.dimension
    }

    /// Returns the board geometry for mapping moves to coordinates.
    pub fn geometry(&self) -> BoardGeometry {
        BoardGeometry::new(self.header.extent, self.header.dimension)
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn root_index(&self) -> NodeIndex {
        ROOT_INDEX
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT_INDEX]
    }

    /// Returns the node at the given index, or `None` if out of bounds.
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Returns the number of nodes in this tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the depth of the deepest node (0 for a lone root).
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(Node::depth).max().unwrap_or(0)
    }

    /// Returns the index of the child of `parent` reached by move `mv`.
    ///
    /// # Panics
    /// Panics if `parent` is out of bounds.
    pub fn child(&self, parent: NodeIndex, mv: MoveIndex) -> Option<NodeIndex> {
        self[parent].child(mv)
    }

    /// Iterates over `(move, child)` pairs of the node at `index`, in file order.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn children_of(&self, index: NodeIndex) -> impl Iterator<Item = (MoveIndex, &Node)> + '_ {
        let node = &self[index];
        node.moves()
            .iter()
            .copied()
            .zip(node.children().iter().map(move |&child| &self.nodes[child]))
    }

    /// Reconstructs the move path from the root to the node at `index`,
    /// following parent links.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn move_path(&self, index: NodeIndex) -> Vec<MoveIndex> {
        let mut path = Vec::with_capacity(self[index].depth());
        let mut current = &self[index];
        while let (Some(parent), Some(mv)) = (current.parent(), current.incoming_move()) {
            path.push(mv);
            current = &self.nodes[parent];
        }
        path.reverse();
        path
    }
}

impl std::ops::Index<NodeIndex> for SolutionTree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

// =#========================================================================#=
// TREE ITERATORS
// =#========================================================================#=
impl SolutionTree {
    /// Returns an iterator over all nodes in pre-order,
    /// yielding `(index, node)` pairs.
    ///
    /// The order is the order of node lines in the solution file, and
    /// thus the order in which a [NodeStream](crate::decoder::NodeStream)
    /// yields the same nodes.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter {
            inner: self.nodes.iter().enumerate(),
        }
    }
}

/// Pre-order iterator over the nodes of a [SolutionTree].
pub struct PreOrderIter<'a> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (NodeIndex, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for PreOrderIter<'_> {}
