//! Solution file writing.
//!
//! Serializes a [SolutionTree] back into the line format read by the
//! [decoder](crate::decoder), in canonical form: single blanks between
//! fields, the child moves directly after the `:`, and `\n` line ends.
//! Decoding the output yields the same tree.

use crate::model::{Header, NodeRecord, SolutionTree};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Estimated bytes per node line, for pre-allocation
const ESTIMATED_LINE_LEN: usize = 16;

/// Returns the solution file content of `tree`.
///
/// # Example
/// ```
/// use soltree::decode_str;
/// use soltree::writer::to_solution_string;
///
/// let tree = decode_str("3 2\n2  5 2 : 0 4\n1 1 0 :\n\n2 1 0 :")?;
/// assert_eq!(to_solution_string(&tree), "3 2\n2 5 2 :0 4\n1 1 0 :\n2 1 0 :\n");
/// # Ok::<(), soltree::parser::FormatError>(())
/// ```
pub fn to_solution_string(tree: &SolutionTree) -> String {
    let mut out = String::with_capacity(tree.num_nodes() * ESTIMATED_LINE_LEN);
    push_header_line(&mut out, tree.header());
    for (_, node) in tree.pre_order_iter() {
        push_node_line(&mut out, node.record());
    }
    out
}

/// Writes the solution file content of `tree` to `writer`.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_solution<W: Write>(mut writer: W, tree: &SolutionTree) -> io::Result<()> {
    let mut line = String::new();
    push_header_line(&mut line, tree.header());
    writer.write_all(line.as_bytes())?;

    for (_, node) in tree.pre_order_iter() {
        line.clear();
        push_node_line(&mut line, node.record());
        writer.write_all(line.as_bytes())?;
    }
    writer.flush()
}

/// Writes the solution file content of `tree` to a new file at `path`,
/// replacing any existing file.
///
/// # Errors
/// Returns an I/O error if the file cannot be created or written.
pub fn write_solution_file<P: AsRef<Path>>(path: P, tree: &SolutionTree) -> io::Result<()> {
    let file = File::create(path)?;
    write_solution(BufWriter::new(file), tree)
}

fn push_header_line(out: &mut String, header: Header) {
    out.push_str(&header.extent.to_string());
    out.push(' ');
    out.push_str(&header.dimension.to_string());
    out.push('\n');
}

/// Appends one node line; records with search statistics use the
/// extended field layout.
fn push_node_line(out: &mut String, record: &NodeRecord) {
    let size = record.num_children() as u64;
    let result = u64::from(record.result.code());
    let fields: Vec<u64> = match &record.search {
        None => vec![result, record.count, size],
        Some(search) => vec![
            result,
            u64::from(search.is_final),
            search.proof.value(),
            search.disproof.value(),
            record.count,
            size,
            u64::from(search.reason),
        ],
    };

    for field in fields {
        out.push_str(&field.to_string());
        out.push(' ');
    }
    out.push(':');
    for (i, mv) in record.moves.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&mv.to_string());
    }
    out.push('\n');
}
