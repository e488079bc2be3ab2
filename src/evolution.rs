//! Reader for proof-number evolution logs.
//!
//! The solver can log the proof and disproof numbers of the root, and the
//! depth of the most-proving node, once per visited node. The log holds one
//! sample per line: `<proof> <disproof> <depth>`.

use crate::model::ProofNumber;
use crate::parser::{ByteParser, ByteSource, FormatError, FormatErrorKind};
use std::path::Path;

/// Number of fields of a sample line
const SAMPLE_FIELDS: usize = 3;

/// One line of a proof-number evolution log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolutionSample {
    pub proof: ProofNumber,
    pub disproof: ProofNumber,
    pub depth: u64,
}

/// Parses all samples of an evolution log. Blank lines are skipped.
///
/// # Errors
/// Returns a [FormatError] citing the line of the first malformed sample.
pub fn parse_evolution<S: ByteSource>(
    mut parser: ByteParser<S>,
) -> Result<Vec<EvolutionSample>, FormatError> {
    let mut samples = Vec::new();
    loop {
        parser.skip_blanks();
        if parser.is_eof() {
            parser.check_io()?;
            return Ok(samples);
        }
        if parser.at_line_end() {
            parser.consume_line_end();
            continue;
        }

        let mut fields = Vec::with_capacity(SAMPLE_FIELDS);
        while !parser.at_line_end() {
            fields.push(parser.parse_unsigned()?);
            parser.skip_blanks();
        }
        let &[proof, disproof, depth] = fields.as_slice() else {
            return Err(FormatError::from_parser(
                FormatErrorKind::FieldCount {
                    expected: SAMPLE_FIELDS.to_string(),
                    found: fields.len(),
                },
                &mut parser,
            ));
        };
        samples.push(EvolutionSample {
            proof: ProofNumber::new(proof),
            disproof: ProofNumber::new(disproof),
            depth,
        });
        parser.consume_line_end();
    }
}

/// Parses an evolution log given as string.
///
/// # Example
/// ```
/// use soltree::evolution::parse_evolution_str;
///
/// let samples = parse_evolution_str("1 1 0\n3 2 1\n1000000 0 1\n")?;
/// assert_eq!(samples.len(), 3);
/// assert!(samples[2].proof.is_infinite());
/// # Ok::<(), soltree::parser::FormatError>(())
/// ```
pub fn parse_evolution_str(input: &str) -> Result<Vec<EvolutionSample>, FormatError> {
    parse_evolution(ByteParser::for_str(input))
}

/// Parses an evolution log file through a buffered reader.
pub fn parse_evolution_file<P: AsRef<Path>>(path: P) -> Result<Vec<EvolutionSample>, FormatError> {
    parse_evolution(ByteParser::from_file_buffered(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_field_count_cites_line() {
        let err = parse_evolution_str("1 1 0\n\n2 2\n").unwrap_err();
        assert_eq!(
            err.kind(),
            &FormatErrorKind::FieldCount {
                expected: "3".to_string(),
                found: 2
            }
        );
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn test_empty_log() {
        assert!(parse_evolution_str("").unwrap().is_empty());
        assert!(parse_evolution_str("\n \n").unwrap().is_empty());
    }
}
