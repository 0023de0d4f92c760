//! Incremental CSV tokenizer
//!
//! A character-level state machine that consumes input in arbitrary chunks
//! and emits field and record events through a [`RecordSink`]. State is kept
//! across calls, so a logical stream may be fed byte by byte or all at once
//! with identical results. `finalize` flushes a field or record left pending
//! when the input ends without a trailing terminator.

use crate::error::{ErrorKind, ParseError, ParseResult};
use crate::parser::buffer::FieldBuffer;

pub(crate) const DEFAULT_QUOTE: u8 = b'"';
pub(crate) const DEFAULT_DELIMITER: u8 = b',';
const SPACE: u8 = b' ';
const TAB: u8 = b'\t';
const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Tokenizer behavior switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Treat malformed quoting as a hard error instead of repairing it
    pub strict: bool,
    /// Emit a record event for rows that contain no fields at all
    pub report_all_newlines: bool,
    /// With `strict`, reject a quoted field left open at end of input
    pub strict_finalize: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_report_all_newlines(mut self, report: bool) -> Self {
        self.report_all_newlines = report;
        self
    }

    pub fn with_strict_finalize(mut self, strict_finalize: bool) -> Self {
        self.strict_finalize = strict_finalize;
        self
    }
}

/// Pluggable byte classifier for whitespace and terminator detection
pub type ByteClassifier = fn(u8) -> bool;

/// Receiver for tokenizer output.
///
/// `field` is invoked with the completed field's bytes, after any
/// trailing-whitespace trim. `record` is invoked with the terminator byte
/// that ended the row, or `0` when the row end was synthesized by
/// [`Tokenizer::finalize`].
pub trait RecordSink {
    fn field(&mut self, bytes: &[u8]);
    fn record(&mut self, terminator: u8);
}

/// Explanation of states
///
/// `RowNotBegun`: no fields have been encountered for this row.
/// `FieldNotBegun`: there have been fields but we are currently not in one.
/// `FieldBegun`: we are in a field.
/// `FieldMightHaveEnded`: a quote was seen inside a quoted field; the field
/// is either ended or the quote is literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    RowNotBegun,
    FieldNotBegun,
    FieldBegun,
    FieldMightHaveEnded,
}

/// Stateful CSV tokenizer for one logical stream
#[derive(Debug)]
pub struct Tokenizer {
    state: State,
    /// Whether the field being built began with a quote
    quoted: bool,
    /// Consecutive whitespace bytes most recently appended
    spaces: usize,
    buf: FieldBuffer,
    status: ErrorKind,
    options: ParseOptions,
    quote: u8,
    delimiter: u8,
    space_fn: Option<ByteClassifier>,
    term_fn: Option<ByteClassifier>,
}

impl Tokenizer {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            state: State::RowNotBegun,
            quoted: false,
            spaces: 0,
            buf: FieldBuffer::new(),
            status: ErrorKind::Success,
            options,
            quote: DEFAULT_QUOTE,
            delimiter: DEFAULT_DELIMITER,
            space_fn: None,
            term_fn: None,
        }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    pub fn set_options(&mut self, options: ParseOptions) {
        self.options = options;
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn set_delimiter(&mut self, delimiter: u8) {
        self.delimiter = delimiter;
    }

    pub fn quote(&self) -> u8 {
        self.quote
    }

    pub fn set_quote(&mut self, quote: u8) {
        self.quote = quote;
    }

    /// Override which bytes count as whitespace (default: space and tab).
    pub fn set_space_classifier(&mut self, classifier: Option<ByteClassifier>) {
        self.space_fn = classifier;
    }

    /// Override which bytes end a physical line (default: CR and LF).
    pub fn set_terminator_classifier(&mut self, classifier: Option<ByteClassifier>) {
        self.term_fn = classifier;
    }

    /// Cap the field buffer so oversized fields fail instead of growing.
    pub fn set_buffer_limit(&mut self, limit: usize) {
        self.buf.set_limit(limit);
    }

    /// Reset stream state for a new logical stream, keeping configuration.
    pub fn reset(&mut self) {
        self.state = State::RowNotBegun;
        self.quoted = false;
        self.spaces = 0;
        self.buf.clear();
        self.status = ErrorKind::Success;
    }

    /// Status recorded by the last `parse` call.
    pub fn status(&self) -> ErrorKind {
        self.status
    }

    /// Clear a recorded error so parsing may resume after caller intervention.
    pub fn clear_status(&mut self) {
        self.status = ErrorKind::Success;
    }

    fn is_space(&self, byte: u8) -> bool {
        match self.space_fn {
            Some(f) => f(byte),
            None => byte == SPACE || byte == TAB,
        }
    }

    fn is_terminator(&self, byte: u8) -> bool {
        match self.term_fn {
            Some(f) => f(byte),
            None => byte == CR || byte == LF,
        }
    }

    fn submit_field(&mut self, sink: &mut dyn RecordSink) {
        if !self.quoted {
            // trailing whitespace is trimmed from unquoted fields only
            self.buf.truncate_by(self.spaces);
        }
        sink.field(self.buf.as_slice());
        self.state = State::FieldNotBegun;
        self.buf.clear();
        self.quoted = false;
        self.spaces = 0;
    }

    fn submit_record(&mut self, sink: &mut dyn RecordSink, terminator: u8) {
        sink.record(terminator);
        self.state = State::RowNotBegun;
        self.buf.clear();
        self.quoted = false;
        self.spaces = 0;
    }

    /// Consume a chunk of the stream, emitting events into `sink`.
    ///
    /// Returns the number of bytes consumed. On success that equals
    /// `input.len()`; a short count means an error was recorded and parsing
    /// stopped at the returned offset with internal state intact. Callers
    /// must check [`status`](Self::status) after every call rather than
    /// relying on the count alone.
    pub fn parse(&mut self, input: &[u8], sink: &mut dyn RecordSink) -> usize {
        let mut pos = 0;
        while pos < input.len() {
            if !self.buf.has_room() {
                if let Err(kind) = self.buf.grow() {
                    self.status = kind;
                    return pos;
                }
            }
            let c = input[pos];
            pos += 1;
            match self.state {
                State::RowNotBegun | State::FieldNotBegun => {
                    if self.is_space(c) {
                        // leading whitespace; quoting is not yet known
                    } else if self.is_terminator(c) {
                        if self.state == State::FieldNotBegun {
                            self.submit_field(sink);
                            self.submit_record(sink, c);
                        } else if self.options.report_all_newlines {
                            // empty rows are swallowed unless requested
                            self.submit_record(sink, c);
                        }
                    } else if c == self.delimiter {
                        self.submit_field(sink);
                    } else if c == self.quote {
                        self.state = State::FieldBegun;
                        self.quoted = true;
                    } else {
                        self.state = State::FieldBegun;
                        self.quoted = false;
                        self.buf.push(c);
                    }
                }
                State::FieldBegun => {
                    if c == self.quote {
                        if self.quoted {
                            self.buf.push(c);
                            self.state = State::FieldMightHaveEnded;
                        } else if self.options.strict {
                            // bare quote inside an unquoted field
                            self.status = ErrorKind::Parse;
                            return pos - 1;
                        } else {
                            self.buf.push(c);
                            self.spaces = 0;
                        }
                    } else if c == self.delimiter {
                        if self.quoted {
                            self.buf.push(c);
                        } else {
                            self.submit_field(sink);
                        }
                    } else if self.is_terminator(c) {
                        if self.quoted {
                            self.buf.push(c);
                        } else {
                            self.submit_field(sink);
                            self.submit_record(sink, c);
                        }
                    } else if !self.quoted && self.is_space(c) {
                        self.buf.push(c);
                        self.spaces += 1;
                    } else {
                        self.buf.push(c);
                        self.spaces = 0;
                    }
                }
                State::FieldMightHaveEnded => {
                    // only reachable after a quote inside a quoted field
                    if c == self.delimiter {
                        // drop buffered spaces and the candidate close quote
                        self.buf.truncate_by(self.spaces + 1);
                        self.submit_field(sink);
                    } else if self.is_terminator(c) {
                        self.buf.truncate_by(self.spaces + 1);
                        self.submit_field(sink);
                        self.submit_record(sink, c);
                    } else if self.is_space(c) {
                        self.buf.push(c);
                        self.spaces += 1;
                    } else if c == self.quote {
                        if self.spaces > 0 {
                            // quote after intervening spaces is unescaped
                            if self.options.strict {
                                self.status = ErrorKind::Parse;
                                return pos - 1;
                            }
                            self.spaces = 0;
                            self.buf.push(c);
                        } else {
                            // two quotes in a row: the buffered one is literal
                            self.state = State::FieldBegun;
                        }
                    } else {
                        if self.options.strict {
                            self.status = ErrorKind::Parse;
                            return pos - 1;
                        }
                        // resume as an unquoted continuation of the field
                        self.state = State::FieldBegun;
                        self.spaces = 0;
                        self.buf.push(c);
                    }
                }
            }
        }
        pos
    }

    /// `parse` wrapped so status checking cannot be forgotten.
    pub fn feed(&mut self, input: &[u8], sink: &mut dyn RecordSink) -> ParseResult<usize> {
        let consumed = self.parse(input, sink);
        match self.status {
            ErrorKind::Success => Ok(consumed),
            kind => Err(ParseError::new(kind, kind.describe().to_string()).at_offset(consumed)),
        }
    }

    /// Flush a field or record left pending at end of stream.
    ///
    /// Needed, for example, when the input does not end in a newline. The
    /// synthesized record event carries terminator byte `0`. Calling this
    /// when no row is in progress is a no-op.
    pub fn finalize(&mut self, sink: &mut dyn RecordSink) -> ParseResult<()> {
        if self.state == State::FieldBegun
            && self.quoted
            && self.options.strict
            && self.options.strict_finalize
        {
            self.status = ErrorKind::Parse;
            return Err(ParseError::new(
                ErrorKind::Parse,
                "quoted field still open at end of input".to_string(),
            ));
        }

        match self.state {
            State::FieldMightHaveEnded => {
                // strip trailing spaces and the close quote as a real
                // terminator would have
                self.buf.truncate_by(self.spaces + 1);
                self.submit_field(sink);
                self.submit_record(sink, 0);
            }
            State::FieldNotBegun | State::FieldBegun => {
                self.submit_field(sink);
                self.submit_record(sink, 0);
            }
            State::RowNotBegun => {} // already ended properly
        }

        self.spaces = 0;
        self.quoted = false;
        self.buf.clear();
        self.status = ErrorKind::Success;
        self.state = State::RowNotBegun;
        Ok(())
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}
