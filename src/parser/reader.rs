//! Line-oriented record reader
//!
//! Wraps the tokenizer with a driving loop over physical lines so callers
//! can consume whole logical records. A quoted field may contain a literal
//! newline, so one record can span several physical lines; the reader keeps
//! feeding lines into the same engine state until a record completes. The
//! sequence is lazy, one-pass, and only restartable through [`reset`].
//!
//! [`reset`]: RecordReader::reset

use crate::error::ParseResult;
use crate::parser::tokenizer::{ParseOptions, RecordSink, Tokenizer};

/// Sink that materializes one record as owned field strings
#[derive(Default)]
struct RowCollector {
    fields: Vec<String>,
    done: bool,
}

impl RecordSink for RowCollector {
    fn field(&mut self, bytes: &[u8]) {
        self.fields.push(String::from_utf8_lossy(bytes).into_owned());
    }

    fn record(&mut self, _terminator: u8) {
        self.done = true;
    }
}

/// Reads logical records out of an in-memory CSV document
#[derive(Debug)]
pub struct RecordReader {
    tokenizer: Tokenizer,
    source: String,
    pos: usize,
    failed: bool,
}

impl RecordReader {
    pub fn new(source: String) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    pub fn with_options(source: String, options: ParseOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(options),
            source,
            pos: 0,
            failed: false,
        }
    }

    /// Start over on a new document, keeping delimiter/quote configuration.
    pub fn reset(&mut self, source: String) {
        self.tokenizer.reset();
        self.source = source;
        self.pos = 0;
        self.failed = false;
    }

    /// Change the field delimiter.
    ///
    /// The whitespace classification follows the delimiter: a tab delimiter
    /// leaves only the space byte as whitespace, a space delimiter leaves
    /// only tab, and any other delimiter keeps both.
    pub fn set_delimiter(&mut self, delimiter: u8) {
        self.tokenizer.set_delimiter(delimiter);
        self.tokenizer
            .set_space_classifier(space_classifier_for(delimiter));
    }

    pub fn delimiter(&self) -> u8 {
        self.tokenizer.delimiter()
    }

    pub fn set_quote(&mut self, quote: u8) {
        self.tokenizer.set_quote(quote);
    }

    pub fn set_options(&mut self, options: ParseOptions) {
        self.tokenizer.set_options(options);
    }

    pub fn set_buffer_limit(&mut self, limit: usize) {
        self.tokenizer.set_buffer_limit(limit);
    }

    /// Whether unread input remains.
    pub fn has_next(&self) -> bool {
        !self.failed && self.pos < self.source.len()
    }

    /// Skip one physical line without parsing it.
    pub fn skip_line(&mut self) {
        let bytes = self.source.as_bytes();
        match bytes[self.pos..].iter().position(|&b| b == b'\n') {
            Some(i) => self.pos += i + 1,
            None => self.pos = bytes.len(),
        }
    }

    /// Read the next logical record, or `None` when the input is exhausted.
    ///
    /// Strict-mode failures surface once as `Some(Err(..))`; the reader
    /// stops afterwards until [`reset`](Self::reset).
    pub fn next_record(&mut self) -> Option<ParseResult<Vec<String>>> {
        if self.failed {
            return None;
        }
        let mut row = RowCollector::default();
        loop {
            if self.pos >= self.source.len() {
                // input exhausted: flush a field left open by an unclosed quote
                if let Err(err) = self.tokenizer.finalize(&mut row) {
                    self.failed = true;
                    return Some(Err(err));
                }
                break;
            }
            if let Err(err) = self.feed_next_line(&mut row) {
                self.failed = true;
                return Some(Err(err));
            }
            if row.done {
                break;
            }
        }
        if row.done || !row.fields.is_empty() {
            Some(Ok(row.fields))
        } else {
            None
        }
    }

    /// Feed one physical line, terminator appended, into the engine.
    fn feed_next_line(&mut self, row: &mut RowCollector) -> ParseResult<()> {
        let bytes = self.source.as_bytes();
        let start = self.pos;
        let (mut end, next) = match bytes[start..].iter().position(|&b| b == b'\n') {
            Some(i) => (start + i, start + i + 1),
            None => (bytes.len(), bytes.len()),
        };
        if end > start && bytes[end - 1] == b'\r' {
            end -= 1;
        }
        self.pos = next;
        self.tokenizer.feed(&self.source.as_bytes()[start..end], row)?;
        self.tokenizer.feed(b"\n", row)?;
        Ok(())
    }
}

impl Iterator for RecordReader {
    type Item = ParseResult<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

/// Whitespace classifier matching a delimiter choice.
///
/// The engine tests for whitespace before it tests for the delimiter, so a
/// whitespace byte chosen as the delimiter must be dropped from the
/// whitespace set or it would be skipped as padding.
pub(crate) fn space_classifier_for(
    delimiter: u8,
) -> Option<crate::parser::tokenizer::ByteClassifier> {
    match delimiter {
        b'\t' => Some(space_only),
        b' ' => Some(tab_only),
        _ => None,
    }
}

fn space_only(byte: u8) -> bool {
    byte == b' '
}

fn tab_only(byte: u8) -> bool {
    byte == b'\t'
}
