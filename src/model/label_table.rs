//! Label module for display names of integer codes.
//!
//! - `LabelTable`: Code-to-label lookup loaded once from a flat label file.

use crate::model::node::GameResult;
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;

// =#========================================================================#=
// LABEL TABLE
// =#========================================================================#=
/// Maps small integer codes (result codes, reason codes) to display strings.
///
/// A label file lists one label per line; the code of a label is its
/// 0-based line number. Each line is trimmed and a single trailing `,` is
/// removed, so an enumerator list can be used as a label file directly.
///
/// The decoder never consults a [LabelTable]; codes stay plain integers
/// in the tree and are only translated for presentation.
///
/// # Example
/// ```
/// use soltree::model::LabelTable;
///
/// let reasons = LabelTable::parse("  WIN,\n  DRAW,\n  PRUNING\n");
///
/// assert_eq!(reasons.num_labels(), 3);
/// assert_eq!(reasons.get(1), Some("DRAW"));
/// assert_eq!(reasons.label_or_code(9), "9");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    /// Labels indexed by code
    labels: Vec<String>,
}

impl LabelTable {
    /// Creates a table from labels given in code order.
    pub fn new<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        LabelTable {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses the content of a label file.
    ///
    /// A trailing newline does not add an empty label; empty lines inside
    /// the file do, to keep codes aligned with line numbers.
    pub fn parse(text: &str) -> Self {
        let labels = text
            .lines()
            .map(|line| {
                let line = line.trim();
                line.strip_suffix(',').unwrap_or(line).trim_end().to_string()
            })
            .collect();
        LabelTable { labels }
    }

    /// Reads and parses a label file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// Default display names for [GameResult] codes.
    pub fn results() -> Self {
        Self::new(["X wins", "O wins", "draw", "unknown"])
    }

    /// Retrieves the label for a given code.
    ///
    /// # Returns
    /// `Some(&str)` if the code is listed, `None` otherwise
    pub fn get(&self, code: u32) -> Option<&str> {
        let index = usize::try_from(code).ok()?;
        self.labels.get(index).map(String::as_str)
    }

    /// Returns the label for `code`, or the code itself in decimal
    /// if the table has no such entry.
    pub fn label_or_code(&self, code: u32) -> Cow<'_, str> {
        match self.get(code) {
            Some(label) => Cow::Borrowed(label),
            None => Cow::Owned(code.to_string()),
        }
    }

    /// Returns the label of a game result, see [label_or_code](Self::label_or_code).
    pub fn result_label(&self, result: GameResult) -> Cow<'_, str> {
        self.label_or_code(u32::from(result.code()))
    }

    /// Returns the number of labels in this table.
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the labels in code order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl fmt::Display for LabelTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (code, label) in self.labels.iter().enumerate() {
            writeln!(f, "{code}: {label}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_commas_and_keeps_empty_lines() {
        let table = LabelTable::parse("MINIMAX_EARLY,\n\n\tWIN ,\r\n");
        assert_eq!(table.labels(), &["MINIMAX_EARLY", "", "WIN"]);
    }

    #[test]
    fn test_result_defaults() {
        let results = LabelTable::results();
        assert_eq!(results.result_label(GameResult::OWins), "O wins");
        assert_eq!(results.result_label(GameResult::Unknown), "unknown");
        assert_eq!(LabelTable::default().result_label(GameResult::Draw), "2");
    }
}
