//! Core normalization engine
//!
//! Parses an input document into records and re-emits it as canonical CSV:
//! every field quoted, embedded quotes doubled, one newline-terminated
//! record per logical row.

use crate::conversion::config::CsvConfig;
use crate::conversion::limits;
use crate::conversion::CsvResult;
use crate::error::CsvError;
use crate::formatter::RecordWriter;
use crate::parser::{CsvSource, RecordReader};
use std::time::Instant;

/// Normalization result
#[derive(Debug, Clone)]
pub struct CsvData {
    pub content: String,
    pub metadata: CsvMetadata,
}

impl CsvData {
    pub fn new(content: String, metadata: CsvMetadata) -> Self {
        Self { content, metadata }
    }

    /// Get the normalized CSV output
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Get the length of the output in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the output is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Metadata about the normalization process
#[derive(Debug, Clone)]
pub struct CsvMetadata {
    pub input_size: u64,
    pub output_size: u64,
    pub row_count: usize,
    pub field_count: usize,
    pub processing_time_ms: u64,
}

/// Main normalization engine
pub struct NormalizeEngine {
    config: CsvConfig,
}

impl NormalizeEngine {
    /// Create a new engine
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Normalize a CSV document held in memory.
    pub fn normalize(&self, content: &str) -> CsvResult<CsvData> {
        let start_time = Instant::now();

        limits::check_content_size(content, &self.config)?;

        let mut reader =
            RecordReader::with_options(content.to_string(), self.config.parse_options());
        reader.set_delimiter(self.config.delimiter_byte());
        reader.set_quote(self.config.quote_byte());
        reader.set_buffer_limit(self.config.memory_limit);

        if self.config.skip_first_row {
            reader.skip_line();
        }

        let writer = RecordWriter::new(self.config.delimiter_byte(), self.config.quote_byte());
        let mut out: Vec<u8> = Vec::with_capacity(content.len());
        let mut row_count = 0usize;
        let mut field_count = 0usize;

        for record in reader {
            let record = record?;
            row_count += 1;
            field_count += record.len();
            writer.write_record(&mut out, &record)?;
        }

        let output = String::from_utf8_lossy(&out).into_owned();
        let metadata = CsvMetadata {
            input_size: content.len() as u64,
            output_size: output.len() as u64,
            row_count,
            field_count,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        Ok(CsvData::new(output, metadata))
    }

    /// Normalize CSV read from a source.
    pub fn normalize_source(&self, source: &CsvSource) -> CsvResult<CsvData> {
        // check the size before reading to avoid loading very large files
        limits::check_source_size_before_read(source, &self.config)?;

        let path = match source {
            CsvSource::File(path) => Some(path.clone()),
            _ => None,
        };
        let content = source
            .read_content()
            .map_err(|e| CsvError::io(e.to_string(), path))?;

        self.normalize(&content)
    }
}

/// Normalize a CSV document with the given configuration
pub fn normalize_csv(content: &str, config: &CsvConfig) -> CsvResult<CsvData> {
    NormalizeEngine::new(config.clone()).normalize(content)
}
