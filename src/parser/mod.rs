//! CSV parsing module
//!
//! The tokenizer is the incremental engine; the reader drives it across
//! physical lines; sources abstract where the raw text comes from.

pub mod buffer;
pub mod directory;
pub mod filter;
pub mod reader;
pub mod tokenizer;
pub mod validation;

use crate::error::ParseResult;
use std::io::Read;
use std::path::PathBuf;

pub use reader::RecordReader;
pub use tokenizer::{ByteClassifier, ParseOptions, RecordSink, Tokenizer};

/// Where CSV input comes from
#[derive(Debug, Clone)]
pub enum CsvSource {
    /// Raw CSV text
    String(String),
    /// A CSV file on disk
    File(PathBuf),
    /// Standard input stream
    Stdin,
}

impl CsvSource {
    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            CsvSource::String(_) => "string input".to_string(),
            CsvSource::File(path) => format!("file: {}", path.display()),
            CsvSource::Stdin => "standard input".to_string(),
        }
    }

    /// Check if the source exists and is accessible
    pub fn exists(&self) -> bool {
        match self {
            CsvSource::String(_) => true,
            CsvSource::File(path) => path.exists() && path.is_file(),
            CsvSource::Stdin => true,
        }
    }

    /// Get the size of the source in bytes (if known without reading)
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            CsvSource::String(s) => Some(s.len() as u64),
            CsvSource::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            CsvSource::Stdin => None, // unknown until read
        }
    }

    /// Read the whole source as a string
    pub fn read_content(&self) -> Result<String, std::io::Error> {
        match self {
            CsvSource::String(content) => Ok(content.clone()),
            CsvSource::File(path) => std::fs::read_to_string(path),
            CsvSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

/// Parse a whole document into records with default settings.
pub fn parse_records(content: &str) -> ParseResult<Vec<Vec<String>>> {
    parse_records_with_options(content, ParseOptions::default())
}

/// Parse a whole document into records with explicit tokenizer options.
pub fn parse_records_with_options(
    content: &str,
    options: ParseOptions,
) -> ParseResult<Vec<Vec<String>>> {
    let reader = RecordReader::with_options(content.to_string(), options);
    reader.collect()
}
