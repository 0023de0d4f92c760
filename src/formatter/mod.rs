//! CSV output formatting module

pub mod quotes;

pub use quotes::{escape_field, FieldEscaper, DEFAULT_QUOTE};

use std::io::{self, Write};

/// Writes whole records as canonical CSV
///
/// Every field is escaped unconditionally, fields are joined with the
/// output delimiter, and each record ends with a newline.
#[derive(Debug, Clone, Copy)]
pub struct RecordWriter {
    delimiter: u8,
    escaper: FieldEscaper,
}

impl Default for RecordWriter {
    fn default() -> Self {
        Self::new(b',', DEFAULT_QUOTE)
    }
}

impl RecordWriter {
    pub fn new(delimiter: u8, quote: u8) -> Self {
        Self {
            delimiter,
            escaper: FieldEscaper::new(quote),
        }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Write one record to a stream.
    pub fn write_record<W, S>(&self, writer: &mut W, fields: &[S]) -> io::Result<()>
    where
        W: Write,
        S: AsRef<str>,
    {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                writer.write_all(&[self.delimiter])?;
            }
            self.escaper.write_to(writer, field.as_ref().as_bytes())?;
        }
        writer.write_all(b"\n")
    }

    /// Render one record as a string.
    pub fn record_to_string<S: AsRef<str>>(&self, fields: &[S]) -> String {
        let mut out = Vec::new();
        // writing to a Vec cannot fail
        let _ = self.write_record(&mut out, fields);
        String::from_utf8_lossy(&out).into_owned()
    }
}
