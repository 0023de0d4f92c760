//! Error types and status codes for CSV parsing and normalization

use std::fmt;
use std::path::PathBuf;

/// Engine status codes reported by the tokenizer.
///
/// `Success` is the initial value; a failure status is sticky until the
/// caller clears it or finalizes the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No error has been recorded
    Success,
    /// Malformed quoting encountered while strict checking is enabled
    Parse,
    /// Memory exhausted while increasing the field buffer
    OutOfMemory,
    /// Required buffer size exceeds the maximum representable size
    BufferTooLarge,
    /// An unrecognized status value was queried
    InvalidStatus,
}

impl ErrorKind {
    /// Map a status code to its fixed description.
    pub fn describe(self) -> &'static str {
        match self {
            ErrorKind::Success => "success",
            ErrorKind::Parse => "error parsing data while strict checking enabled",
            ErrorKind::OutOfMemory => "memory exhausted while increasing buffer size",
            ErrorKind::BufferTooLarge => "data size too large",
            ErrorKind::InvalidStatus => "invalid status code",
        }
    }

    /// Check whether this status represents a failure.
    pub fn is_error(self) -> bool {
        self != ErrorKind::Success
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// CSV parsing errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    /// Byte offset of the offending byte within the chunk that failed
    pub offset: Option<usize>,
    /// One-based (line, column) position when it can be computed
    pub location: Option<(usize, usize)>,
}

impl ParseError {
    pub fn new(kind: ErrorKind, message: String) -> Self {
        Self {
            kind,
            message,
            offset: None,
            location: None,
        }
    }

    pub fn at_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.location = Some((line, column));
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        } else if let Some(offset) = self.offset {
            write!(f, " at byte {}", offset)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Main error type for library and CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge { size: usize, limit: usize },

    #[error("invalid configuration: {message}")]
    Configuration { message: String },
}

impl CsvError {
    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(err) => {
                if let Some((line, col)) = err.location {
                    format!(
                        "CSV parse error at line {}, column {}: {}",
                        line, col, err.message
                    )
                } else {
                    format!("CSV parse error: {}", err)
                }
            }
            Self::Io { message, path } => match path {
                Some(path) => format!("IO error on '{}': {}", path.display(), message),
                None => format!("IO error: {}", message),
            },
            Self::InputTooLarge { size, limit } => {
                format!("CSV input too large: {} bytes (limit: {} bytes)", size, limit)
            }
            Self::Configuration { message } => format!("Invalid configuration: {}", message),
        }
    }
}

impl From<std::io::Error> for CsvError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            path: None,
        }
    }
}

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for library and CLI operations
pub type CsvResult<T> = Result<T, CsvError>;
