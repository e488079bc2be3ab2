use soltree::decoder::{SolutionParser, decode_file, stream_file};
use soltree::model::LabelTable;
use soltree::parser::{ByteParser, FormatErrorKind};
use soltree::traversal::{
    BranchingStats, ChildCountHistogram, LevelStats, ReasonHistogram, accumulate,
    accumulate_stream,
};

const BASIC_FIXTURE: &str = "tests/fixtures/basic_3x3.txt";
const EXTENDED_FIXTURE: &str = "tests/fixtures/extended_3x3.txt";

#[test]
fn test_branching_per_level() {
    let tree = decode_file(BASIC_FIXTURE).unwrap();
    let stats = accumulate(&tree, BranchingStats::new());

    assert_eq!(
        stats.levels(),
        &[
            LevelStats { nodes: 1, children: 3 },
            LevelStats { nodes: 3, children: 3 },
            LevelStats { nodes: 3, children: 0 },
        ]
    );
    assert_eq!(stats.average_branching(0), Some(3.0));
    assert_eq!(stats.average_branching(1), Some(1.0));
    assert_eq!(stats.average_branching(2), Some(0.0));
    assert_eq!(stats.average_branching(3), None);
    assert_eq!(stats.total_nodes(), tree.num_nodes() as u64);
    assert_eq!(
        stats.to_string(),
        "level 0 : 3.00\nlevel 1 : 1.00\nlevel 2 : 0.00\n"
    );
}

#[test]
fn test_stream_and_tree_folds_agree() {
    for path in [BASIC_FIXTURE, EXTENDED_FIXTURE] {
        let tree = decode_file(path).unwrap();
        let from_tree = accumulate(
            &tree,
            (
                BranchingStats::new(),
                ReasonHistogram::new(),
                ChildCountHistogram::new(),
            ),
        );
        let from_stream = accumulate_stream(
            stream_file(path).unwrap(),
            (
                BranchingStats::new(),
                ReasonHistogram::new(),
                ChildCountHistogram::new(),
            ),
        )
        .unwrap();
        assert_eq!(from_tree, from_stream);
    }
}

#[test]
fn test_child_count_histogram() {
    let tree = decode_file(BASIC_FIXTURE).unwrap();
    let histogram = accumulate(&tree, ChildCountHistogram::new());
    assert_eq!(
        histogram.iter().collect::<Vec<_>>(),
        vec![(0, 4), (1, 1), (2, 1), (3, 1)]
    );
    assert_eq!(histogram.count(5), 0);
}

#[test]
fn test_reason_histogram_with_labels() {
    let reasons = LabelTable::from_file("tests/fixtures/reasons.txt").unwrap();
    let histogram = accumulate_stream(stream_file(EXTENDED_FIXTURE).unwrap(), ReasonHistogram::new())
        .unwrap();

    let named: Vec<(String, u64)> = histogram
        .iter()
        .map(|(code, count)| (reasons.label_or_code(code).into_owned(), count))
        .collect();
    assert_eq!(
        named,
        vec![
            ("MINIMAX_EARLY".to_string(), 1),
            ("MINIMAX_COMPLETE".to_string(), 1),
            ("ZOBRIST".to_string(), 2),
        ]
    );
    assert_eq!(histogram.without_reason(), 0);
}

#[test]
fn test_reason_histogram_on_basic_schema() {
    let tree = decode_file(BASIC_FIXTURE).unwrap();
    let histogram = accumulate(&tree, ReasonHistogram::new());
    assert!(histogram.is_empty());
    assert_eq!(histogram.without_reason(), 7);
}

#[test]
fn test_stream_fold_surfaces_errors() {
    let stream = SolutionParser::new()
        .into_stream(ByteParser::for_str("3 2\n2 5 2 :0 4\n1 1 0 :\n"))
        .unwrap();
    let err = accumulate_stream(stream, BranchingStats::new()).unwrap_err();
    assert_eq!(err.kind(), &FormatErrorKind::UnexpectedEof);
}
