use soltree::decoder::decode_file;
use soltree::writer::{to_solution_string, write_solution, write_solution_file};
use soltree::{decode_bytes, decode_str};

const FIXTURES: [&str; 3] = [
    "tests/fixtures/basic_3x3.txt",
    "tests/fixtures/extended_3x3.txt",
    "tests/fixtures/tiny_2x2x2.txt",
];

#[test]
fn test_fixtures_are_written_verbatim() {
    // All fixtures are in canonical form already
    for path in FIXTURES {
        let tree = decode_file(path).unwrap();
        let expected = std::fs::read_to_string(path).unwrap();
        assert_eq!(to_solution_string(&tree), expected, "{path}");
    }
}

#[test]
fn test_decoding_written_tree_restores_it() {
    let input = "3 2\n2   5 2 :  0 4 \n\n1 1 0 :\r\n2 1 0 :";
    let tree = decode_str(input).unwrap();

    let mut bytes = Vec::new();
    write_solution(&mut bytes, &tree).unwrap();
    assert_eq!(decode_bytes(&bytes).unwrap(), tree);
}

#[test]
fn test_write_solution_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("solution.txt");

    let tree = decode_file(FIXTURES[1]).unwrap();
    write_solution_file(&out, &tree).unwrap();
    assert_eq!(decode_file(&out).unwrap(), tree);
}
