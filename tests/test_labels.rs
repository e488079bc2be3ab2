use soltree::model::{GameResult, LabelTable};
use std::io::Write;

#[test]
fn test_reason_file_as_label_table() {
    let reasons = LabelTable::from_file("tests/fixtures/reasons.txt").unwrap();
    assert_eq!(reasons.num_labels(), 4);
    assert_eq!(reasons.get(0), Some("MINIMAX_EARLY"));
    assert_eq!(reasons.get(3), Some("ZOBRIST"));
    assert_eq!(reasons.get(4), None);
    assert_eq!(reasons.label_or_code(4), "4");
}

#[test]
fn test_result_labels_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Vitória do X\nVitória do O\nEmpate").unwrap();

    let results = LabelTable::from_file(file.path()).unwrap();
    assert_eq!(results.result_label(GameResult::XWins), "Vitória do X");
    assert_eq!(results.result_label(GameResult::Draw), "Empate");
    // No label for unknown: the code is shown instead
    assert_eq!(results.result_label(GameResult::Unknown), "3");
}

#[test]
fn test_missing_label_file() {
    assert!(LabelTable::from_file("tests/fixtures/missing_labels.txt").is_err());
}

#[test]
fn test_display_lists_codes() {
    let table = LabelTable::new(["WIN", "DRAW"]);
    assert_eq!(table.to_string(), "0: WIN\n1: DRAW\n");
    assert!(LabelTable::default().is_empty());
}
