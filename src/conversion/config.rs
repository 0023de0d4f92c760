//! Configuration options for CSV parsing and normalization

use crate::parser::ParseOptions;

/// Field delimiter options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterType {
    /// Comma delimiter (,)
    Comma,
    /// Semicolon delimiter (;)
    Semicolon,
    /// Tab delimiter (\\t)
    Tab,
    /// Any other single ASCII character
    Custom(char),
}

impl DelimiterType {
    pub fn as_byte(&self) -> u8 {
        match self {
            DelimiterType::Comma => b',',
            DelimiterType::Semicolon => b';',
            DelimiterType::Tab => b'\t',
            DelimiterType::Custom(c) => *c as u8,
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "comma" | "," => Ok(DelimiterType::Comma),
            "semicolon" | ";" => Ok(DelimiterType::Semicolon),
            "tab" | "\t" => Ok(DelimiterType::Tab),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii() => Ok(DelimiterType::Custom(c)),
                    _ => Err(format!(
                        "Invalid delimiter '{}'. Use 'comma', 'semicolon', 'tab', or a single ASCII character",
                        other
                    )),
                }
            }
        }
    }
}

/// CSV parsing and normalization configuration
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Field delimiter
    pub delimiter: DelimiterType,
    /// Quote character
    pub quote: char,
    /// Fail on malformed quoting instead of repairing it
    pub strict: bool,
    /// Report rows that contain no fields at all
    pub report_all_newlines: bool,
    /// With strict, reject a quoted field left open at end of input
    pub strict_finalize: bool,
    /// Treat the first row as a header and leave it out of the output
    pub skip_first_row: bool,
    /// Maximum input size and field buffer ceiling in bytes
    pub memory_limit: usize,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: DelimiterType::Comma,
            quote: '"',
            strict: false,
            report_all_newlines: false,
            strict_finalize: false,
            skip_first_row: false,
            memory_limit: 100 * 1024 * 1024, // 100MB
        }
    }
}

impl CsvConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration for strict validation runs
    pub fn strict_validation() -> Self {
        Self {
            strict: true,
            strict_finalize: true,
            ..Default::default()
        }
    }

    /// Create configuration for tab-separated input
    pub fn tab_separated() -> Self {
        Self {
            delimiter: DelimiterType::Tab,
            ..Default::default()
        }
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: DelimiterType) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character
    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Enable or disable strict quoting checks
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Report rows with no fields at all
    pub fn with_report_all_newlines(mut self, report: bool) -> Self {
        self.report_all_newlines = report;
        self
    }

    /// Reject quoted fields left open at end of input (with strict)
    pub fn with_strict_finalize(mut self, strict_finalize: bool) -> Self {
        self.strict_finalize = strict_finalize;
        self
    }

    /// Skip the first row as a header
    pub fn with_skip_first_row(mut self, skip: bool) -> Self {
        self.skip_first_row = skip;
        self
    }

    /// Set the memory limit
    pub fn with_memory_limit(mut self, limit_bytes: usize) -> Self {
        self.memory_limit = limit_bytes;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.quote.is_ascii() {
            return Err("Quote character must be ASCII".to_string());
        }

        if let DelimiterType::Custom(c) = self.delimiter {
            if !c.is_ascii() {
                return Err("Delimiter character must be ASCII".to_string());
            }
        }

        if self.delimiter.as_byte() == self.quote as u8 {
            return Err("Delimiter and quote characters must differ".to_string());
        }

        if self.memory_limit < 1024 {
            return Err("Memory limit must be at least 1KB".to_string());
        }

        Ok(())
    }

    /// Tokenizer options derived from this configuration
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict: self.strict,
            report_all_newlines: self.report_all_newlines,
            strict_finalize: self.strict_finalize,
        }
    }

    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_byte()
    }

    pub fn quote_byte(&self) -> u8 {
        self.quote as u8
    }
}
