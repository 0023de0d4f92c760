//! Integration tests for escaping and the escape/parse round trip

use csvnorm::{escape_field, parse_csv, FieldEscaper, RecordWriter};
use pretty_assertions::assert_eq;

#[test]
fn test_plain_values_round_trip() {
    for value in ["hello", "with space", "trailing dot.", "", "héllo wörld"] {
        let escaped = escape_field(value);
        let records = parse_csv(&format!("{}\n", escaped)).unwrap();
        assert_eq!(records, vec![vec![value.to_string()]], "value {:?}", value);
    }
}

#[test]
fn test_quote_heavy_values_round_trip() {
    for value in ["\"", "a\"b", "\"\"", "say \"hi\" now", "\"wrapped\""] {
        let escaped = escape_field(value);
        let records = parse_csv(&format!("{}\n", escaped)).unwrap();
        assert_eq!(records, vec![vec![value.to_string()]], "value {:?}", value);
    }
}

#[test]
fn test_delimiter_and_newline_values_round_trip() {
    for value in ["a,b", "line1\nline2", ",", "\n", "a,\"b\n"] {
        let escaped = escape_field(value);
        let records = parse_csv(&format!("{}\n", escaped)).unwrap();
        assert_eq!(records, vec![vec![value.to_string()]], "value {:?}", value);
    }
}

#[test]
fn test_escape_doubles_every_quote() {
    assert_eq!(escape_field("a\"b\"c"), "\"a\"\"b\"\"c\"");
    let escaped = escape_field("\"\"\"");
    assert_eq!(escaped, "\"\"\"\"\"\"\"\"");
    assert_eq!(escaped.len(), 2 + 3 * 2);
}

#[test]
fn test_sizing_mode_matches_written_output() {
    let escaper = FieldEscaper::default();
    for value in ["", "plain", "qu\"ote", "\"\"", "a,b\nc"] {
        let needed = escaper.required_len(value.as_bytes());
        assert_eq!(needed, escaper.escape(value.as_bytes()).len(), "value {:?}", value);
    }
}

#[test]
fn test_truncated_write_still_reports_full_size() {
    let escaper = FieldEscaper::default();
    let mut small = [0u8; 3];
    let needed = escaper.write_into(&mut small, b"abcdef");
    assert_eq!(needed, 8);
    assert_eq!(&small, b"\"ab");
}

#[test]
fn test_whole_record_round_trip() {
    let writer = RecordWriter::default();
    let fields = vec!["plain", "a,b", "multi\nline", "qu\"ote", ""];
    let line = writer.record_to_string(&fields);
    let records = parse_csv(&line).unwrap();
    assert_eq!(records, vec![fields]);
}

#[test]
fn test_custom_quote_round_trip() {
    let escaper = FieldEscaper::new(b'\'');
    let escaped = escaper.escape_str("it's a 'test'");
    assert_eq!(escaped, "'it''s a ''test'''");
}
