//! Integration tests for streaming chunk behavior

use csvnorm::{ErrorKind, ParseOptions, RecordSink, Tokenizer};
use pretty_assertions::assert_eq;

#[derive(Debug, Default, PartialEq)]
struct Events {
    fields: Vec<String>,
    rows: Vec<u8>,
}

impl RecordSink for Events {
    fn field(&mut self, bytes: &[u8]) {
        self.fields.push(String::from_utf8_lossy(bytes).into_owned());
    }

    fn record(&mut self, terminator: u8) {
        self.rows.push(terminator);
    }
}

fn parse_in_chunks(input: &str, chunk_size: usize) -> Events {
    let mut tokenizer = Tokenizer::new(ParseOptions::default());
    let mut events = Events::default();
    for chunk in input.as_bytes().chunks(chunk_size) {
        let consumed = tokenizer.parse(chunk, &mut events);
        assert_eq!(consumed, chunk.len());
        assert_eq!(tokenizer.status(), ErrorKind::Success);
    }
    tokenizer.finalize(&mut events).unwrap();
    events
}

const GNARLY: &str = "plain,\"quoted,delim\",\"multi\nline\"\n  padded  ,\"say \"\"hi\"\"\"\nlast,row";

#[test]
fn test_chunk_size_does_not_change_events() {
    let whole = parse_in_chunks(GNARLY, GNARLY.len());
    for chunk_size in [1, 2, 3, 5, 7, 16] {
        let chunked = parse_in_chunks(GNARLY, chunk_size);
        assert_eq!(chunked, whole, "chunk size {}", chunk_size);
    }
}

#[test]
fn test_expected_events_for_mixed_document() {
    let events = parse_in_chunks(GNARLY, 4);
    assert_eq!(
        events.fields,
        vec![
            "plain",
            "quoted,delim",
            "multi\nline",
            "padded",
            "say \"hi\"",
            "last",
            "row",
        ]
    );
    // the final row was never terminated, so its terminator is synthesized
    assert_eq!(events.rows, vec![b'\n', b'\n', 0]);
}

#[test]
fn test_state_persists_between_calls() {
    let mut tokenizer = Tokenizer::new(ParseOptions::default());
    let mut events = Events::default();

    tokenizer.parse(b"first,\"sec", &mut events);
    assert!(events.fields.len() == 1, "only the closed field is emitted");

    tokenizer.parse(b"ond\",third\n", &mut events);
    assert_eq!(events.fields, vec!["first", "second", "third"]);
    assert_eq!(events.rows, vec![b'\n']);
}

#[test]
fn test_quoted_field_split_at_escape_sequence() {
    let mut tokenizer = Tokenizer::new(ParseOptions::default());
    let mut events = Events::default();

    // chunk boundary lands between the two quotes of an escaped quote
    tokenizer.parse(b"\"a\"", &mut events);
    tokenizer.parse(b"\"b\"\n", &mut events);
    assert_eq!(events.fields, vec!["a\"b"]);
}

#[test]
fn test_finalize_is_noop_after_complete_row() {
    let mut tokenizer = Tokenizer::new(ParseOptions::default());
    let mut events = Events::default();

    tokenizer.parse(b"a,b\n", &mut events);
    tokenizer.finalize(&mut events).unwrap();
    tokenizer.finalize(&mut events).unwrap();

    assert_eq!(events.fields, vec!["a", "b"]);
    assert_eq!(events.rows, vec![b'\n']);
}

#[test]
fn test_empty_chunks_are_harmless() {
    let mut tokenizer = Tokenizer::new(ParseOptions::default());
    let mut events = Events::default();

    assert_eq!(tokenizer.parse(b"", &mut events), 0);
    tokenizer.parse(b"x\n", &mut events);
    assert_eq!(tokenizer.parse(b"", &mut events), 0);
    assert_eq!(events.fields, vec!["x"]);
}
