//! csvnorm — streaming CSV parsing, validation and normalization
//!
//! A Rust library and CLI tool built around an incremental CSV tokenizer:
//! input may arrive in arbitrary chunks, quoted fields may span physical
//! lines, and malformed quoting is either repaired or rejected depending on
//! the configured strictness.

// Allow dead code for library exports that may not be used by the binary yet
#![allow(dead_code)]

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod parser;

// Re-export commonly used types
pub use conversion::{normalize_csv, CsvConfig, CsvData, DelimiterType, ParseStatistics};
pub use error::{CsvError, ErrorKind, ParseError, ParseResult};
pub use formatter::{escape_field, FieldEscaper, RecordWriter};
pub use parser::{CsvSource, ParseOptions, RecordReader, RecordSink, Tokenizer};

/// Parse CSV text into records with default settings
pub fn parse_csv(content: &str) -> ParseResult<Vec<Vec<String>>> {
    parser::parse_records(content)
}

/// Parse CSV text into records with a custom configuration
pub fn parse_csv_with_config(
    content: &str,
    config: &CsvConfig,
) -> ParseResult<Vec<Vec<String>>> {
    let mut reader = RecordReader::with_options(content.to_string(), config.parse_options());
    reader.set_delimiter(config.delimiter_byte());
    reader.set_quote(config.quote_byte());
    if config.skip_first_row {
        reader.skip_line();
    }
    reader.collect()
}
