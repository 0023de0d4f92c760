//! CSV validation utilities

use crate::error::{ErrorKind, ParseError, ParseResult};
use crate::parser::tokenizer::{ParseOptions, RecordSink, Tokenizer};

/// Outcome of validating a whole document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    pub row_count: usize,
    pub field_count: usize,
}

/// Sink that only counts events
#[derive(Default)]
struct CountingSink {
    rows: usize,
    fields: usize,
}

impl RecordSink for CountingSink {
    fn field(&mut self, _bytes: &[u8]) {
        self.fields += 1;
    }

    fn record(&mut self, _terminator: u8) {
        self.rows += 1;
    }
}

/// Validate a whole CSV document with strict quoting rules.
///
/// Returns row and field counts on success. Failures carry the byte offset
/// of the offending byte and its line/column position in the document.
pub fn validate_csv(content: &str, delimiter: u8, quote: u8) -> ParseResult<ValidationReport> {
    let mut tokenizer = Tokenizer::new(
        ParseOptions::new()
            .with_strict(true)
            .with_strict_finalize(true),
    );
    tokenizer.set_delimiter(delimiter);
    tokenizer.set_quote(quote);
    tokenizer.set_space_classifier(crate::parser::reader::space_classifier_for(delimiter));

    let mut sink = CountingSink::default();
    let consumed = tokenizer.parse(content.as_bytes(), &mut sink);
    match tokenizer.status() {
        ErrorKind::Success => {}
        kind => {
            let (line, column) = offset_to_location(content, consumed);
            return Err(ParseError::new(kind, kind.describe().to_string())
                .at_offset(consumed)
                .with_location(line, column));
        }
    }

    tokenizer.finalize(&mut sink).map_err(|err| {
        let (line, column) = offset_to_location(content, content.len());
        err.with_location(line, column)
    })?;

    Ok(ValidationReport {
        row_count: sink.rows,
        field_count: sink.fields,
    })
}

/// Translate a byte offset into a one-based (line, column) position.
fn offset_to_location(content: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(content.len());
    let before = &content.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let column = offset - before.iter().rposition(|&b| b == b'\n').map_or(0, |p| p + 1) + 1;
    (line, column)
}
