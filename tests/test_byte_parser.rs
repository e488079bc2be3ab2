use soltree::parser::{ByteParser, FormatErrorKind};

#[test]
fn test_skip_blanks_stops_at_line_end() {
    let mut parser = ByteParser::for_str(" \t \n x");
    parser.skip_blanks();
    assert!(parser.at_line_end());
    assert_eq!(parser.peek(), Some(b'\n'));

    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'x'));
    assert_eq!(parser.line(), 2);
}

#[test]
fn test_parse_unsigned_fields() {
    let mut parser = ByteParser::for_str("1000000 0:7\n");
    assert_eq!(parser.parse_unsigned().unwrap(), 1_000_000);
    parser.skip_blanks();
    assert_eq!(parser.parse_unsigned().unwrap(), 0);
    assert!(parser.consume_if(b':'));
    assert_eq!(parser.parse_unsigned().unwrap(), 7);
    assert!(parser.at_line_end());
    assert_eq!(parser.position(), 11);
}

#[test]
fn test_parse_unsigned_rejects_signs() {
    let mut parser = ByteParser::for_str("-3 4");
    let err = parser.parse_unsigned().unwrap_err();
    assert_eq!(err.kind(), &FormatErrorKind::InvalidInteger("-3".to_string()));
    assert_eq!(err.line(), 1);
}

#[test]
fn test_buffered_reader_tracks_lines() {
    let mut parser = ByteParser::from_reader("3 2\r\n1 1 0 :\n".as_bytes());
    assert_eq!(parser.parse_unsigned().unwrap(), 3);
    parser.skip_blanks();
    assert_eq!(parser.parse_unsigned().unwrap(), 2);
    assert!(parser.consume_line_end());
    assert_eq!(parser.line(), 2);
    assert_eq!(parser.get_context_as_string(50), "1 1 0 :");
    parser.skip_whitespace();
    assert!(!parser.is_eof());
}
