//! Integration tests for end-to-end normalization

use assert_matches::assert_matches;
use csvnorm::{normalize_csv, CsvConfig, CsvError, DelimiterType};
use pretty_assertions::assert_eq;

#[test]
fn test_normalize_preserves_embedded_structures() {
    let input = "a,\"b,c\",\"line1\nline2\"\nd,e,f\n";
    let data = normalize_csv(input, &CsvConfig::default()).unwrap();
    assert_eq!(
        data.as_str(),
        "\"a\",\"b,c\",\"line1\nline2\"\n\"d\",\"e\",\"f\"\n"
    );
    assert_eq!(data.metadata.row_count, 2);
    assert_eq!(data.metadata.field_count, 6);
}

#[test]
fn test_normalize_trims_unquoted_padding() {
    let data = normalize_csv("  a  , b ,\" c \"\n", &CsvConfig::default()).unwrap();
    assert_eq!(data.as_str(), "\"a\",\"b\",\" c \"\n");
}

#[test]
fn test_normalize_is_idempotent() {
    let config = CsvConfig::default();
    let input = "x,\"y\"\"z\",  w\nlast,row";
    let once = normalize_csv(input, &config).unwrap();
    let twice = normalize_csv(once.as_str(), &config).unwrap();
    assert_eq!(once.as_str(), twice.as_str());
}

#[test]
fn test_normalize_with_header_skip() {
    let config = CsvConfig::default().with_skip_first_row(true);
    let data = normalize_csv("title,year\nHamlet,1603\nOthello,1604\n", &config).unwrap();
    assert_eq!(data.as_str(), "\"Hamlet\",\"1603\"\n\"Othello\",\"1604\"\n");
    assert_eq!(data.metadata.row_count, 2);
}

#[test]
fn test_normalize_semicolon_to_semicolon() {
    let config = CsvConfig::default().with_delimiter(DelimiterType::Semicolon);
    let data = normalize_csv("a;\"b;c\"\n", &config).unwrap();
    assert_eq!(data.as_str(), "\"a\";\"b;c\"\n");
}

#[test]
fn test_normalize_tab_separated() {
    let config = CsvConfig::tab_separated();
    let data = normalize_csv("a\tb c\td\n", &config).unwrap();
    assert_eq!(data.as_str(), "\"a\"\t\"b c\"\t\"d\"\n");
}

#[test]
fn test_normalize_empty_input() {
    let data = normalize_csv("", &CsvConfig::default()).unwrap();
    assert!(data.is_empty());
    assert_eq!(data.metadata.row_count, 0);
}

#[test]
fn test_normalize_blank_lines_dropped_by_default() {
    let data = normalize_csv("a\n\n\nb\n", &CsvConfig::default()).unwrap();
    assert_eq!(data.as_str(), "\"a\"\n\"b\"\n");
}

#[test]
fn test_normalize_blank_lines_kept_when_reported() {
    let config = CsvConfig::default().with_report_all_newlines(true);
    let data = normalize_csv("a\n\nb\n", &config).unwrap();
    assert_eq!(data.as_str(), "\"a\"\n\n\"b\"\n");
    assert_eq!(data.metadata.row_count, 3);
}

#[test]
fn test_memory_limit_enforced() {
    let config = CsvConfig::default().with_memory_limit(2048);
    let big = "field,another\n".repeat(200);
    let err = normalize_csv(&big, &config).unwrap_err();
    assert_matches!(err, CsvError::InputTooLarge { .. });
}

#[test]
fn test_field_near_buffer_cap_still_parses() {
    let config = CsvConfig::default().with_memory_limit(1024);
    let mut input = String::from("ok,");
    input.push_str(&"x".repeat(900));
    input.push('\n');
    let data = normalize_csv(&input, &config).unwrap();
    assert_eq!(data.metadata.field_count, 2);
}

#[test]
fn test_field_buffer_cap_surfaces_as_parse_error() {
    let mut reader = csvnorm::RecordReader::new(format!("a,{}\n", "x".repeat(300)));
    reader.set_buffer_limit(128);
    let err = reader.next_record().unwrap().unwrap_err();
    assert_eq!(err.kind, csvnorm::ErrorKind::BufferTooLarge);
}
