use soltree::evolution::{EvolutionSample, parse_evolution_file, parse_evolution_str};
use soltree::model::ProofNumber;
use soltree::parser::FormatErrorKind;

#[test]
fn test_parse_fixture() {
    let samples = parse_evolution_file("tests/fixtures/evolution.txt").unwrap();
    assert_eq!(samples.len(), 4);
    assert_eq!(
        samples[1],
        EvolutionSample {
            proof: ProofNumber::new(2),
            disproof: ProofNumber::new(1),
            depth: 1,
        }
    );
    let last = samples.last().unwrap();
    assert!(last.proof.is_infinite());
    assert_eq!(last.disproof.value(), 0);
}

#[test]
fn test_malformed_sample() {
    let err = parse_evolution_str("1 1 0\n2 one 1\n").unwrap_err();
    assert_eq!(err.kind(), &FormatErrorKind::InvalidInteger("one".to_string()));
    assert_eq!(err.line(), 2);

    let err = parse_evolution_str("1 1 0 4\n").unwrap_err();
    assert!(matches!(err.kind(), FormatErrorKind::FieldCount { found: 4, .. }));
}
