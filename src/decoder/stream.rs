//! Lazy pre-order decoding of node lines.
//!
//! [NodeStream] performs the recursive descent over the node lines with an
//! explicit stack of pending child moves instead of native recursion, so the
//! depth of a solution tree never affects the call stack.

use crate::decoder::parser::parse_node_line;
use crate::model::{Header, MoveIndex, NodeRecord, Schema};
use crate::parser::{ByteParser, ByteSource, FormatError, FormatErrorKind};
use tracing::debug;

// =#========================================================================#=
// STREAMED NODE
// =#========================================================================#=
/// A node as yielded by a [NodeStream]: its record and its place in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamedNode {
    /// Number of plies from the root (root = 0)
    pub depth: usize,
    /// Move leading from the parent to this node, `None` for the root
    pub incoming_move: Option<MoveIndex>,
    pub record: NodeRecord,
}

// =#========================================================================#=
// NODE STREAM (lazy decoder)
// =#========================================================================$=
/// Iterator over the nodes of a solution file in pre-order.
///
/// Created by [SolutionParser::into_stream()](crate::decoder::SolutionParser::into_stream)
/// once the header has been read. Yields `Result<StreamedNode, FormatError>`
/// for each node line without retaining the nodes; peak memory is bounded
/// by the depth of the tree times the branching of the nodes on the current
/// path.
///
/// The stream is single pass. After the last node of the root's subtree it
/// checks that only whitespace remains. After an error it yields nothing
/// more, since the implicit subtree boundaries cannot be recovered.
/// Dropping it early leaves the underlying input at an unspecified offset.
pub struct NodeStream<S: ByteSource> {
    byte_parser: ByteParser<S>,
    header: Header,
    schema: Option<Schema>,
    /// Child moves of the unfinished nodes on the current path, shallowest
    /// first; each node's moves form one contiguous run
    moves: Vec<MoveIndex>,
    /// One cursor into `moves` per unfinished node; the top entry belongs
    /// to the deepest one and its run extends to the end of `moves`
    pending: Vec<PendingMoves>,
    started: bool,
    done: bool,
    num_nodes: usize,
}

/// Run of child moves in [NodeStream::moves] belonging to one node.
struct PendingMoves {
    start: usize,
    /// Next move to descend into
    next: usize,
}

impl<S: ByteSource> NodeStream<S> {
    pub(crate) fn new(byte_parser: ByteParser<S>, header: Header, schema: Option<Schema>) -> Self {
        NodeStream {
            byte_parser,
            header,
            schema,
            moves: Vec::new(),
            pending: Vec::new(),
            started: false,
            done: false,
            num_nodes: 0,
        }
    }

    /// Returns the header read before the first node.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns the schema of the node lines, known once the first node
    /// has been read (or if it was required up front).
    pub fn schema(&self) -> Option<Schema> {
        self.schema
    }

    /// Returns the number of nodes yielded so far.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the 1-based line number of the input position.
    pub fn line(&self) -> usize {
        self.byte_parser.line()
    }

    /// Returns the depth and incoming move of the next node in pre-order,
    /// or `None` once the root's subtree is complete.
    fn next_position(&mut self) -> Option<(usize, Option<MoveIndex>)> {
        if !self.started {
            self.started = true;
            return Some((0, None));
        }
        while let Some(cursor) = self.pending.last_mut() {
            if let Some(&mv) = self.moves.get(cursor.next) {
                cursor.next += 1;
                return Some((self.pending.len(), Some(mv)));
            }
            let start = cursor.start;
            self.pending.pop();
            self.moves.truncate(start);
        }
        None
    }

    /// Accepts only whitespace after the last node.
    fn check_trailing_content(&mut self) -> Result<(), FormatError> {
        self.byte_parser.skip_whitespace();
        if self.byte_parser.is_eof() {
            self.byte_parser.check_io()
        } else {
            Err(FormatError::from_parser(
                FormatErrorKind::TrailingContent,
                &mut self.byte_parser,
            ))
        }
    }

    fn fail(&mut self, err: FormatError) -> Option<Result<StreamedNode, FormatError>> {
        self.done = true;
        self.pending.clear();
        self.moves.clear();
        Some(Err(err))
    }
}

impl<S: ByteSource> Iterator for NodeStream<S> {
    type Item = Result<StreamedNode, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let Some((depth, incoming_move)) = self.next_position() else {
            self.done = true;
            if let Err(err) = self.check_trailing_content() {
                return Some(Err(err));
            }
            debug!(num_nodes = self.num_nodes, "solution stream exhausted");
            return None;
        };

        let record = match parse_node_line(&mut self.byte_parser, &mut self.schema) {
            Ok(record) => record,
            Err(err) => return self.fail(err),
        };
        if !record.moves.is_empty() {
            let start = self.moves.len();
            self.moves.extend_from_slice(&record.moves);
            self.pending.push(PendingMoves { start, next: start });
        }
        self.num_nodes += 1;

        Some(Ok(StreamedNode {
            depth,
            incoming_move,
            record,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::decoder::SolutionParser;
    use crate::parser::{ByteParser, FormatErrorKind};

    #[test]
    fn test_positions_follow_pre_order() {
        let input = "3 2\n2 9 2 :4 0\n0 3 1 :8\n0 1 0 :\n1 1 0 :\n";
        let stream = SolutionParser::new()
            .into_stream(ByteParser::for_str(input))
            .unwrap();

        let positions: Vec<_> = stream
            .map(|node| {
                let node = node.unwrap();
                (node.depth, node.incoming_move)
            })
            .collect();
        assert_eq!(
            positions,
            vec![(0, None), (1, Some(4)), (2, Some(8)), (1, Some(0))]
        );
    }

    #[test]
    fn test_siblings_resume_after_nested_subtrees() {
        let input = "3 2\n2 9 2 :4 0\n0 3 2 :8 2\n0 1 0 :\n1 1 1 :6\n0 1 0 :\n1 1 0 :\n";
        let stream = SolutionParser::new()
            .into_stream(ByteParser::for_str(input))
            .unwrap();

        let positions: Vec<_> = stream
            .map(|node| {
                let node = node.unwrap();
                (node.depth, node.incoming_move, node.record.moves)
            })
            .collect();
        assert_eq!(
            positions,
            vec![
                (0, None, vec![4, 0]),
                (1, Some(4), vec![8, 2]),
                (2, Some(8), vec![]),
                (2, Some(2), vec![6]),
                (3, Some(6), vec![]),
                (1, Some(0), vec![]),
            ]
        );
    }

    #[test]
    fn test_stops_after_error() {
        let input = "3 2\n2 5 2 :0 4\n1 1 0 :\n";
        let mut stream = SolutionParser::new()
            .into_stream(ByteParser::for_str(input))
            .unwrap();

        assert!(stream.next().unwrap().is_ok());
        assert!(stream.next().unwrap().is_ok());
        let err = stream.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), &FormatErrorKind::UnexpectedEof);
        assert_eq!(err.line(), 4);
        assert!(stream.next().is_none());
        assert_eq!(stream.num_nodes(), 2);
    }

    #[test]
    fn test_trailing_content_is_rejected() {
        let input = "3 2\n1 1 0 :\n\n2 1 0 :\n";
        let mut stream = SolutionParser::new()
            .into_stream(ByteParser::for_str(input))
            .unwrap();

        assert!(stream.next().unwrap().is_ok());
        let err = stream.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), &FormatErrorKind::TrailingContent);
        assert_eq!(err.line(), 4);
        assert!(stream.next().is_none());
    }
}
