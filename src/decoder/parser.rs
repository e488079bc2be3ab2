//! Line-level grammar of solution files and the [SolutionParser]
//! configuration that drives it.
//!
//! The grammar is line oriented: one header line, then one node line per
//! tree node in pre-order. A node line lists its child moves after the `:`
//! separator, and the line of each child follows recursively. The recursion
//! itself lives in [NodeStream]; this module only reads single lines.

use crate::decoder::defs::{
    ANY_SCHEMA_FIELDS, BASIC_COUNT_FIELD, BASIC_RESULT_FIELD, BASIC_SIZE_FIELD,
    CHILD_CAPACITY_LIMIT, CHILD_SEPARATOR, EXTENDED_COUNT_FIELD, EXTENDED_DISPROOF_FIELD,
    EXTENDED_FINAL_FIELD, EXTENDED_PROOF_FIELD, EXTENDED_REASON_FIELD, EXTENDED_RESULT_FIELD,
    EXTENDED_SIZE_FIELD, SUPPORTED_DIMENSIONS,
};
use crate::decoder::stream::NodeStream;
use crate::model::{
    GameResult, Header, MoveIndex, NodeRecord, ProofNumber, Schema, SearchStats, SolutionTree,
    TreeBuilder,
};
use crate::parser::{ByteParser, ByteSource, FormatError, FormatErrorKind};
use std::collections::HashSet;
use tracing::debug;

// =#========================================================================#=
// SOLUTION PARSER
// =#========================================================================$=
/// Parser (configuration) for solution files.
///
/// # Construction
/// * [`new()`](Self::new) - accepts both schemas, decided by the first node line
/// * [`with_schema(schema)`](Self::with_schema) - additionally requires
///   the given [Schema]
///
/// # Parsing
/// * [`decode()`](Self::decode) - builds the whole [SolutionTree]
/// * [`into_stream()`](Self::into_stream) - yields nodes one by one
///   in pre-order, without retaining them
///
/// Both take a [ByteParser] positioned at the start of the file.
///
/// # Example
/// ```
/// use soltree::decoder::SolutionParser;
/// use soltree::model::Schema;
/// use soltree::parser::ByteParser;
///
/// let input = "3 2\n2 5 2 :0 4\n1 1 0 :\n2 1 0 :\n";
/// let tree = SolutionParser::new().decode(ByteParser::for_str(input)).unwrap();
/// assert_eq!(tree.schema(), Schema::Basic);
///
/// let strict = SolutionParser::new().with_schema(Schema::Extended);
/// assert!(strict.decode(ByteParser::for_str(input)).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolutionParser {
    /// Schema every node line must follow; detected from the first line if `None`
    expected_schema: Option<Schema>,
}

impl SolutionParser {
    /// Creates a parser accepting either schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires every node line to follow `schema`.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.expected_schema = Some(schema);
        self
    }

    pub fn expected_schema(&self) -> Option<Schema> {
        self.expected_schema
    }

    /// Decodes a complete solution file into a [SolutionTree].
    ///
    /// # Errors
    /// Returns the first [FormatError] encountered; a malformed file
    /// yields no tree.
    pub fn decode<S: ByteSource>(
        &self,
        byte_parser: ByteParser<S>,
    ) -> Result<SolutionTree, FormatError> {
        let mut stream = self.into_stream(byte_parser)?;
        let mut builder = TreeBuilder::new(stream.header());
        for node in stream.by_ref() {
            builder.add_node(node?);
        }

        let num_nodes = builder.num_nodes();
        let schema = stream.schema();
        let tree = builder.finish(schema).ok_or_else(|| {
            FormatError::at_line(FormatErrorKind::UnexpectedEof, stream.line(), String::new())
        })?;
        debug!(num_nodes, ?schema, "decoded solution tree");
        Ok(tree)
    }

    /// Reads the header and returns a [NodeStream] over the node lines.
    ///
    /// # Errors
    /// Returns a [FormatError] if the header line is malformed.
    pub fn into_stream<S: ByteSource>(
        self,
        mut byte_parser: ByteParser<S>,
    ) -> Result<NodeStream<S>, FormatError> {
        let header = parse_header(&mut byte_parser)?;
        debug!(
            extent = header.extent,
            dimension = header.dimension,
            "read solution header"
        );
        Ok(NodeStream::new(byte_parser, header, self.expected_schema))
    }
}

// ============================================================================
// Header line (crate)
// ============================================================================
/// Parses the header line `<n> <d>` and consumes its line end.
pub(crate) fn parse_header<S: ByteSource>(
    parser: &mut ByteParser<S>,
) -> Result<Header, FormatError> {
    parser.skip_blanks();
    if parser.is_eof() {
        return Err(FormatError::unexpected_eof(parser));
    }
    if parser.at_line_end() {
        return Err(FormatError::invalid_header(
            parser,
            "expected board extent and dimension",
        ));
    }
    let extent = parser.parse_unsigned()?;

    parser.skip_blanks();
    if parser.at_line_end() {
        return Err(FormatError::invalid_header(parser, "missing board dimension"));
    }
    let dimension = parser.parse_unsigned()?;

    parser.skip_blanks();
    if !parser.at_line_end() {
        return Err(FormatError::invalid_header(
            parser,
            "expected exactly two integers",
        ));
    }

    let extent = to_usize(extent, parser)?;
    let dimension = to_usize(dimension, parser)?;
    if extent == 0 {
        return Err(FormatError::invalid_header(
            parser,
            "board extent must be at least 1",
        ));
    }
    if !SUPPORTED_DIMENSIONS.contains(&dimension) {
        return Err(FormatError::invalid_header(
            parser,
            &format!("unsupported dimension {dimension} (expected 2 or 3)"),
        ));
    }
    let num_cells = u32::try_from(dimension)
        .ok()
        .and_then(|d| extent.checked_pow(d));
    if num_cells.is_none() {
        return Err(FormatError::invalid_header(parser, "board too large"));
    }

    parser.consume_line_end();
    Ok(Header { extent, dimension })
}

// ============================================================================
// Node lines (crate)
// ============================================================================
/// Parses the next node line, skipping blank lines before it.
///
/// `schema` is the schema of the file so far; it is set by the first
/// node line and every later line must match it.
pub(crate) fn parse_node_line<S: ByteSource>(
    parser: &mut ByteParser<S>,
    schema: &mut Option<Schema>,
) -> Result<NodeRecord, FormatError> {
    skip_blank_lines(parser)?;

    let mut fields = Vec::with_capacity(Schema::Extended.field_count());
    loop {
        parser.skip_blanks();
        if parser.consume_if(CHILD_SEPARATOR) {
            break;
        }
        if parser.at_line_end() {
            return Err(FormatError::from_parser(
                FormatErrorKind::MissingChildSeparator,
                parser,
            ));
        }
        fields.push(parser.parse_unsigned()?);
    }

    let line_schema = check_field_count(fields.len(), schema, parser)?;
    let (result_code, count, size) = match line_schema {
        Schema::Basic => (
            fields[BASIC_RESULT_FIELD],
            fields[BASIC_COUNT_FIELD],
            fields[BASIC_SIZE_FIELD],
        ),
        Schema::Extended => (
            fields[EXTENDED_RESULT_FIELD],
            fields[EXTENDED_COUNT_FIELD],
            fields[EXTENDED_SIZE_FIELD],
        ),
    };

    let result = GameResult::from_code(result_code).ok_or_else(|| {
        FormatError::from_parser(FormatErrorKind::InvalidResult(result_code), parser)
    })?;
    let search = match line_schema {
        Schema::Basic => None,
        Schema::Extended => Some(parse_search_stats(&fields, parser)?),
    };
    let size = to_usize(size, parser)?;

    let moves = parse_child_moves(parser, size)?;
    if moves.len() != size {
        return Err(FormatError::from_parser(
            FormatErrorKind::ChildCountMismatch {
                declared: size,
                found: moves.len(),
            },
            parser,
        ));
    }
    parser.consume_line_end();

    Ok(NodeRecord {
        result,
        count,
        search,
        moves,
    })
}

/// Skips blank lines; fails if the input ends before the next node line.
fn skip_blank_lines<S: ByteSource>(parser: &mut ByteParser<S>) -> Result<(), FormatError> {
    loop {
        parser.skip_blanks();
        if parser.is_eof() {
            return Err(FormatError::unexpected_eof(parser));
        }
        if !parser.at_line_end() {
            return Ok(());
        }
        parser.consume_line_end();
    }
}

/// Checks the number of fixed fields against the file's schema,
/// detecting the schema on the first node line.
fn check_field_count<S: ByteSource>(
    found: usize,
    schema: &mut Option<Schema>,
    parser: &mut ByteParser<S>,
) -> Result<Schema, FormatError> {
    match *schema {
        Some(expected) if expected.field_count() == found => Ok(expected),
        Some(expected) => Err(FormatError::from_parser(
            FormatErrorKind::FieldCount {
                expected: expected.field_count().to_string(),
                found,
            },
            parser,
        )),
        None => {
            let detected = Schema::from_field_count(found).ok_or_else(|| {
                FormatError::from_parser(
                    FormatErrorKind::FieldCount {
                        expected: ANY_SCHEMA_FIELDS.to_string(),
                        found,
                    },
                    parser,
                )
            })?;
            debug!(schema = ?detected, "detected node-line schema");
            *schema = Some(detected);
            Ok(detected)
        }
    }
}

fn parse_search_stats<S: ByteSource>(
    fields: &[u64],
    parser: &mut ByteParser<S>,
) -> Result<SearchStats, FormatError> {
    let is_final = match fields[EXTENDED_FINAL_FIELD] {
        0 => false,
        1 => true,
        other => {
            return Err(FormatError::from_parser(
                FormatErrorKind::InvalidFlag(other),
                parser,
            ));
        }
    };
    let reason = fields[EXTENDED_REASON_FIELD];
    let reason = u32::try_from(reason).map_err(|_| {
        FormatError::from_parser(FormatErrorKind::NumberOutOfRange(reason.to_string()), parser)
    })?;

    Ok(SearchStats {
        is_final,
        proof: ProofNumber::new(fields[EXTENDED_PROOF_FIELD]),
        disproof: ProofNumber::new(fields[EXTENDED_DISPROOF_FIELD]),
        reason,
    })
}

/// Parses the child moves after the `:` up to the line end.
fn parse_child_moves<S: ByteSource>(
    parser: &mut ByteParser<S>,
    declared: usize,
) -> Result<Vec<MoveIndex>, FormatError> {
    let capacity = declared.min(CHILD_CAPACITY_LIMIT);
    let mut moves: Vec<MoveIndex> = Vec::with_capacity(capacity);
    let mut seen: HashSet<MoveIndex> = HashSet::with_capacity(capacity);
    loop {
        parser.skip_blanks();
        if parser.at_line_end() {
            return Ok(moves);
        }
        let value = parser.parse_unsigned()?;
        let mv = to_usize(value, parser)?;
        if !seen.insert(mv) {
            return Err(FormatError::from_parser(
                FormatErrorKind::DuplicateMove(mv),
                parser,
            ));
        }
        moves.push(mv);
    }
}

fn to_usize<S: ByteSource>(value: u64, parser: &mut ByteParser<S>) -> Result<usize, FormatError> {
    usize::try_from(value).map_err(|_| {
        FormatError::from_parser(FormatErrorKind::NumberOutOfRange(value.to_string()), parser)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_of(input: &str) -> Result<Header, FormatError> {
        parse_header(&mut ByteParser::for_str(input))
    }

    #[test]
    fn test_header_variants() {
        assert_eq!(
            header_of("4 3\n").unwrap(),
            Header {
                extent: 4,
                dimension: 3
            }
        );
        assert_eq!(header_of(" 3\t2 \r\n").unwrap().extent, 3);

        for bad in ["3\n2 5 2 :", "3 2 1\n", "0 2\n", "3 4\n", "\n3 2\n"] {
            let err = header_of(bad).unwrap_err();
            assert!(
                matches!(err.kind(), FormatErrorKind::InvalidHeader(_)),
                "{bad:?} gave {err}"
            );
            assert_eq!(err.line(), 1);
        }
        assert_eq!(header_of("").unwrap_err().kind(), &FormatErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_node_line_detects_schema_once() {
        let mut parser = ByteParser::for_str("0 1 0 0 3 2 5 :8 2\n2 1 0 :\n");
        let mut schema = None;

        let record = parse_node_line(&mut parser, &mut schema).unwrap();
        assert_eq!(schema, Some(Schema::Extended));
        assert_eq!(record.result, GameResult::XWins);
        assert_eq!(record.count, 3);
        assert_eq!(record.moves, vec![8, 2]);
        let search = record.search.unwrap();
        assert!(search.is_final);
        assert_eq!(search.reason, 5);

        let err = parse_node_line(&mut parser, &mut schema).unwrap_err();
        assert_eq!(
            err.kind(),
            &FormatErrorKind::FieldCount {
                expected: "7".to_string(),
                found: 3
            }
        );
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_node_line_errors() {
        let cases = [
            ("2 5 2 :0\n", FormatErrorKind::ChildCountMismatch { declared: 2, found: 1 }),
            ("2 5 2 0 4\n", FormatErrorKind::MissingChildSeparator),
            ("7 1 0 :\n", FormatErrorKind::InvalidResult(7)),
            ("2 5 2 :4 4\n", FormatErrorKind::DuplicateMove(4)),
            ("2 x 0 :\n", FormatErrorKind::InvalidInteger("x".to_string())),
            ("0 2 1 1 1 0 0 :\n", FormatErrorKind::InvalidFlag(2)),
            (
                "2 5 :\n",
                FormatErrorKind::FieldCount {
                    expected: "3 or 7".to_string(),
                    found: 2,
                },
            ),
        ];
        for (input, kind) in cases {
            let err = parse_node_line(&mut ByteParser::for_str(input), &mut None).unwrap_err();
            assert_eq!(err.kind(), &kind, "input {input:?}");
            assert_eq!(err.line(), 1);
        }
    }

    #[test]
    fn test_blank_lines_before_node_are_skipped() {
        let mut parser = ByteParser::for_str("\n  \n1 1 0 :");
        let record = parse_node_line(&mut parser, &mut None).unwrap();
        assert_eq!(record.result, GameResult::OWins);
        assert!(parser.is_eof());

        let err = parse_node_line(&mut parser, &mut None).unwrap_err();
        assert_eq!(err.kind(), &FormatErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_long_child_list_keeps_order_and_finds_late_duplicate() {
        let moves: Vec<String> = (0..5000).rev().map(|mv| mv.to_string()).collect();
        let line = format!("2 1 5000 :{}\n", moves.join(" "));
        let record = parse_node_line(&mut ByteParser::for_str(&line), &mut None).unwrap();
        assert_eq!(record.moves.len(), 5000);
        assert_eq!(record.moves[0], 4999);
        assert_eq!(record.moves[4999], 0);

        let line = format!("2 1 5001 :{} 1234\n", moves.join(" "));
        let err = parse_node_line(&mut ByteParser::for_str(&line), &mut None).unwrap_err();
        assert_eq!(err.kind(), &FormatErrorKind::DuplicateMove(1234));
    }
}
