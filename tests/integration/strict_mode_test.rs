//! Integration tests for strict versus lenient quoting policies

use assert_matches::assert_matches;
use csvnorm::parser::validation::validate_csv;
use csvnorm::{
    parse_csv, CsvConfig, CsvError, ErrorKind, ParseOptions, RecordSink, Tokenizer,
};

#[derive(Default)]
struct Events {
    fields: Vec<String>,
    rows: usize,
}

impl RecordSink for Events {
    fn field(&mut self, bytes: &[u8]) {
        self.fields.push(String::from_utf8_lossy(bytes).into_owned());
    }

    fn record(&mut self, _terminator: u8) {
        self.rows += 1;
    }
}

#[test]
fn test_lenient_repairs_stray_quote() {
    let records = parse_csv("a\"b,c\n").unwrap();
    assert_eq!(records, vec![vec!["a\"b", "c"]]);
}

#[test]
fn test_strict_reports_offset_of_stray_quote() {
    let mut tokenizer = Tokenizer::new(ParseOptions::new().with_strict(true));
    let mut events = Events::default();

    let input = b"a\"b,c\n";
    let consumed = tokenizer.parse(input, &mut events);
    assert_eq!(tokenizer.status(), ErrorKind::Parse);
    assert_eq!(consumed, 1);
    assert_eq!(input[consumed], b'"');
}

#[test]
fn test_strict_offset_is_chunk_relative() {
    let mut tokenizer = Tokenizer::new(ParseOptions::new().with_strict(true));
    let mut events = Events::default();

    assert_eq!(tokenizer.parse(b"good,row\n", &mut events), 9);
    let consumed = tokenizer.parse(b"xy\"z\n", &mut events);
    assert_eq!(consumed, 2);
    assert_eq!(tokenizer.status(), ErrorKind::Parse);
}

#[test]
fn test_strict_error_leaves_state_resumable() {
    let mut tokenizer = Tokenizer::new(ParseOptions::new().with_strict(true));
    let mut events = Events::default();

    let input = b"ab\"cd\n";
    let consumed = tokenizer.parse(input, &mut events);
    assert_eq!(consumed, 2);

    // skip the bad byte, clear the status, and carry on
    tokenizer.clear_status();
    tokenizer.parse(&input[consumed + 1..], &mut events);
    tokenizer.finalize(&mut events).unwrap();
    assert_eq!(events.fields, vec!["abcd"]);
    assert_eq!(events.rows, 1);
}

#[test]
fn test_quote_after_space_is_strict_error() {
    let mut tokenizer = Tokenizer::new(ParseOptions::new().with_strict(true));
    let mut events = Events::default();

    let input = b"\"a\" \"b\"\n";
    let consumed = tokenizer.parse(input, &mut events);
    assert_eq!(tokenizer.status(), ErrorKind::Parse);
    assert_eq!(input[consumed], b'"');
}

#[test]
fn test_lenient_accepts_quote_after_space() {
    // Both inner quotes become literal content; only the final close quote
    // is trimmed when the terminator arrives.
    let records = parse_csv("\"a\" \"b\"\n").unwrap();
    assert_eq!(records, vec![vec!["a\" \"b"]]);
}

#[test]
fn test_strict_finalize_rejects_open_quote() {
    let options = ParseOptions::new()
        .with_strict(true)
        .with_strict_finalize(true);
    let mut tokenizer = Tokenizer::new(options);
    let mut events = Events::default();

    tokenizer.parse(b"\"open", &mut events);
    let err = tokenizer.finalize(&mut events).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Parse);
    assert!(events.fields.is_empty());
}

#[test]
fn test_finalize_flushes_open_quote_without_strict() {
    let mut tokenizer = Tokenizer::default();
    let mut events = Events::default();

    tokenizer.parse(b"\"open", &mut events);
    tokenizer.finalize(&mut events).unwrap();
    assert_eq!(events.fields, vec!["open"]);
    assert_eq!(events.rows, 1);
}

#[test]
fn test_validation_reports_line_and_column() {
    let err = validate_csv("one,two\nthree,fo\"ur\n", b',', b'"').unwrap_err();
    assert_eq!(err.kind, ErrorKind::Parse);
    assert_eq!(err.offset, Some(16));
    assert_eq!(err.location, Some((2, 9)));
}

#[test]
fn test_normalize_strict_propagates_parse_error() {
    let config = CsvConfig::default().with_strict(true);
    let err = csvnorm::normalize_csv("a\"b\n", &config).unwrap_err();
    assert_matches!(err, CsvError::Parse(_));
}
