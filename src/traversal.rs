//! Read-only aggregations over the nodes of a solution tree.
//!
//! An aggregation is a [NodeAccumulator]: a value that observes every node
//! once, in pre-order, and is handed back to the caller afterwards. The same
//! accumulator can be driven by a materialized [SolutionTree]
//! ([accumulate]) or by a [NodeStream](crate::decoder::NodeStream)
//! ([accumulate_stream]) when the tree is too large to hold in memory.
//!
//! Provided accumulators:
//! * [BranchingStats] - nodes and children per depth, average branching factor
//! * [ReasonHistogram] - frequency of reason codes (extended schema)
//! * [ChildCountHistogram] - frequency of child-list lengths
//!
//! Several accumulators can share one pass by combining them in a tuple.
//!
//! # Example
//! ```
//! use soltree::decode_str;
//! use soltree::traversal::{accumulate, BranchingStats, ChildCountHistogram};
//!
//! let tree = decode_str("3 2\n2 5 2 :0 4\n1 1 0 :\n2 1 0 :")?;
//! let (branching, children) =
//!     accumulate(&tree, (BranchingStats::new(), ChildCountHistogram::new()));
//!
//! assert_eq!(branching.average_branching(0), Some(2.0));
//! assert_eq!(children.count(0), 2);
//! # Ok::<(), soltree::parser::FormatError>(())
//! ```

use crate::decoder::StreamedNode;
use crate::model::{NodeRecord, ReasonCode, SolutionTree};
use crate::parser::FormatError;
use std::collections::BTreeMap;
use std::fmt;

// =#========================================================================#=
// NODE ACCUMULATOR (trait)
// =#========================================================================T=
/// A fold over the nodes of a solution tree.
pub trait NodeAccumulator {
    /// Observes one node at the given depth (root = 0).
    fn observe(&mut self, depth: usize, record: &NodeRecord);
}

impl<A: NodeAccumulator, B: NodeAccumulator> NodeAccumulator for (A, B) {
    fn observe(&mut self, depth: usize, record: &NodeRecord) {
        self.0.observe(depth, record);
        self.1.observe(depth, record);
    }
}

impl<A: NodeAccumulator, B: NodeAccumulator, C: NodeAccumulator> NodeAccumulator for (A, B, C) {
    fn observe(&mut self, depth: usize, record: &NodeRecord) {
        self.0.observe(depth, record);
        self.1.observe(depth, record);
        self.2.observe(depth, record);
    }
}

/// Feeds every node of `tree` to `acc`, in pre-order, and returns it.
pub fn accumulate<A: NodeAccumulator>(tree: &SolutionTree, mut acc: A) -> A {
    for (_, node) in tree.pre_order_iter() {
        acc.observe(node.depth(), node.record());
    }
    acc
}

/// Feeds every streamed node to `acc`, in stream order, and returns it.
///
/// # Errors
/// Returns the first [FormatError] of the stream; the partial accumulator
/// is dropped.
pub fn accumulate_stream<I, A>(nodes: I, mut acc: A) -> Result<A, FormatError>
where
    I: IntoIterator<Item = Result<StreamedNode, FormatError>>,
    A: NodeAccumulator,
{
    for node in nodes {
        let node = node?;
        acc.observe(node.depth, &node.record);
    }
    Ok(acc)
}

// =#========================================================================#=
// BRANCHING STATS
// =#========================================================================$=
/// Node and child totals of one depth level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelStats {
    /// Number of nodes at this depth
    pub nodes: u64,
    /// Sum of their child-list lengths
    pub children: u64,
}

impl LevelStats {
    /// Returns `children / nodes`, or `None` for an empty level.
    pub fn average_branching(&self) -> Option<f64> {
        (self.nodes > 0).then(|| self.children as f64 / self.nodes as f64)
    }
}

/// Per-depth node and child totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchingStats {
    /// Indexed by depth
    levels: Vec<LevelStats>,
}

impl BranchingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the totals of all observed depths, indexed by depth.
    pub fn levels(&self) -> &[LevelStats] {
        &self.levels
    }

    pub fn level(&self, depth: usize) -> Option<&LevelStats> {
        self.levels.get(depth)
    }

    /// Returns the average branching factor at `depth`.
    pub fn average_branching(&self, depth: usize) -> Option<f64> {
        self.level(depth).and_then(LevelStats::average_branching)
    }

    /// Returns the number of observed nodes over all depths.
    pub fn total_nodes(&self) -> u64 {
        self.levels.iter().map(|level| level.nodes).sum()
    }
}

impl NodeAccumulator for BranchingStats {
    fn observe(&mut self, depth: usize, record: &NodeRecord) {
        if self.levels.len() <= depth {
            self.levels.resize(depth + 1, LevelStats::default());
        }
        let level = &mut self.levels[depth];
        level.nodes += 1;
        level.children += record.num_children() as u64;
    }
}

impl fmt::Display for BranchingStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (depth, level) in self.levels.iter().enumerate() {
            let average = level.average_branching().unwrap_or(0.0);
            writeln!(f, "level {depth} : {average:.2}")?;
        }
        Ok(())
    }
}

// =#========================================================================#=
// REASON HISTOGRAM
// =#========================================================================$=
/// Frequency of each reason code.
///
/// Basic-schema nodes carry no reason; they are only counted in
/// [without_reason](Self::without_reason).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReasonHistogram {
    counts: BTreeMap<ReasonCode, u64>,
    without_reason: u64,
}

impl ReasonHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how often `reason` was observed.
    pub fn count(&self, reason: ReasonCode) -> u64 {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    /// Iterates over `(reason, count)` pairs in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (ReasonCode, u64)> + '_ {
        self.counts.iter().map(|(&reason, &count)| (reason, count))
    }

    /// Returns the number of observed nodes without a reason code.
    pub fn without_reason(&self) -> u64 {
        self.without_reason
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl NodeAccumulator for ReasonHistogram {
    fn observe(&mut self, _depth: usize, record: &NodeRecord) {
        match record.reason() {
            Some(reason) => *self.counts.entry(reason).or_insert(0) += 1,
            None => self.without_reason += 1,
        }
    }
}

// =#========================================================================#=
// CHILD COUNT HISTOGRAM
// =#========================================================================$=
/// Frequency of each child-list length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildCountHistogram {
    counts: BTreeMap<usize, u64>,
}

impl ChildCountHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes with exactly `num_children` children.
    pub fn count(&self, num_children: usize) -> u64 {
        self.counts.get(&num_children).copied().unwrap_or(0)
    }

    /// Iterates over `(num_children, count)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts.iter().map(|(&len, &count)| (len, count))
    }
}

impl NodeAccumulator for ChildCountHistogram {
    fn observe(&mut self, _depth: usize, record: &NodeRecord) {
        *self.counts.entry(record.num_children()).or_insert(0) += 1;
    }
}

impl fmt::Display for ChildCountHistogram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (len, count) in self.iter() {
            writeln!(f, "{len} {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GameResult, ProofNumber, SearchStats};

    fn record(moves: Vec<usize>, reason: Option<ReasonCode>) -> NodeRecord {
        NodeRecord {
            result: GameResult::Draw,
            count: 1,
            search: reason.map(|reason| SearchStats {
                is_final: true,
                proof: ProofNumber::new(0),
                disproof: ProofNumber::INFINITE,
                reason,
            }),
            moves,
        }
    }

    #[test]
    fn test_branching_skips_no_levels() {
        let mut stats = BranchingStats::new();
        stats.observe(2, &record(vec![1, 2, 3], None));
        assert_eq!(stats.levels().len(), 3);
        assert_eq!(stats.average_branching(0), None);
        assert_eq!(stats.average_branching(2), Some(3.0));
        assert_eq!(stats.to_string(), "level 0 : 0.00\nlevel 1 : 0.00\nlevel 2 : 3.00\n");
    }

    #[test]
    fn test_reason_histogram_counts_missing_reasons() {
        let (reasons, children) = [
            record(vec![], Some(4)),
            record(vec![0], Some(4)),
            record(vec![], None),
        ]
        .iter()
        .fold(
            (ReasonHistogram::new(), ChildCountHistogram::new()),
            |mut acc, rec| {
                acc.observe(1, rec);
                acc
            },
        );

        assert_eq!(reasons.count(4), 2);
        assert_eq!(reasons.without_reason(), 1);
        assert_eq!(reasons.iter().collect::<Vec<_>>(), vec![(4, 2)]);
        assert_eq!(children.count(0), 2);
        assert_eq!(children.to_string(), "0 2\n1 1\n");
    }
}
