//! Command-line interface module

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::conversion::config::DelimiterType;
use crate::conversion::{CsvConfig, CsvResult};
use crate::error::CsvError;

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "csvnorm")]
#[command(about = "Validate and normalize CSV files with a streaming parser")]
#[command(version = "0.1.0")]
#[command(long_about = None)]
pub struct Args {
    /// Input CSV file or directory
    #[arg()]
    pub input: Option<String>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read CSV from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Recursively process directories
    #[arg(long)]
    pub recursive: bool,

    /// Field delimiter: comma, semicolon, tab, or a single character
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Quote character (default: ")
    #[arg(long)]
    pub quote: Option<char>,

    /// Fail on malformed quoting instead of repairing it
    #[arg(long)]
    pub strict: bool,

    /// With --strict, reject quoted fields left open at end of input
    #[arg(long)]
    pub strict_finalize: bool,

    /// Keep rows that contain no fields at all
    #[arg(long)]
    pub report_all_newlines: bool,

    /// Treat the first row as a header and leave it out of the output
    #[arg(long)]
    pub skip_header: bool,

    /// Maximum memory usage limit (e.g., 100MB, default: 100MB)
    #[arg(long)]
    pub memory_limit: Option<String>,

    /// Only validate the CSV, don't normalize
    #[arg(long)]
    pub validate_only: bool,

    /// Output parsing statistics
    #[arg(long)]
    pub stats: bool,

    /// Statistics output format
    #[arg(long, value_enum, default_value = "text")]
    pub stats_format: StatsFormat,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,

    /// Continue with other files when one file fails
    #[arg(long)]
    pub continue_on_error: bool,
}

/// How statistics are rendered
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsFormat {
    Text,
    Json,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub csv_config: CsvConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> CsvResult<Self> {
        let csv_config = Self::create_csv_config(&args)?;

        Ok(Self { args, csv_config })
    }

    /// Create CSV configuration from CLI arguments
    fn create_csv_config(args: &Args) -> CsvResult<CsvConfig> {
        let delimiter = match args.delimiter.as_deref() {
            Some(s) => DelimiterType::from_str(s).map_err(CsvError::configuration)?,
            None => DelimiterType::Comma,
        };
        let memory_limit = parse_memory_limit(&args.memory_limit)?;

        let config = CsvConfig {
            delimiter,
            quote: args.quote.unwrap_or('"'),
            strict: args.strict || args.validate_only,
            report_all_newlines: args.report_all_newlines,
            strict_finalize: args.strict_finalize,
            skip_first_row: args.skip_header,
            memory_limit,
        };

        // Validate configuration
        config.validate().map_err(CsvError::configuration)?;

        Ok(config)
    }

    /// Check if we should continue on error
    pub fn continue_on_error(&self) -> bool {
        self.args.continue_on_error
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.args.verbose
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Check if only validation is requested
    pub fn is_validate_only(&self) -> bool {
        self.args.validate_only
    }

    /// Get input source description
    pub fn input_description(&self) -> String {
        if self.args.stdin {
            "standard input".to_string()
        } else if let Some(input) = &self.args.input {
            format!("'{}'", input)
        } else {
            "no input specified".to_string()
        }
    }

    /// Get output destination description
    pub fn output_description(&self) -> String {
        if let Some(output) = &self.args.output {
            format!("'{}'", output.display())
        } else {
            "standard output".to_string()
        }
    }
}

/// Parse memory limit string (e.g., "100MB", "1GB", "500KB")
pub fn parse_memory_limit(limit: &Option<String>) -> CsvResult<usize> {
    match limit {
        None => Ok(100 * 1024 * 1024), // 100MB default
        Some(limit_str) => {
            let limit_str = limit_str.trim().to_uppercase();

            if limit_str.ends_with("MB") {
                let size = &limit_str[..limit_str.len() - 2];
                let mb = size.parse::<f64>().map_err(|_| {
                    CsvError::configuration(format!("Invalid memory limit: {}", limit_str))
                })?;
                Ok((mb * 1024.0 * 1024.0) as usize)
            } else if limit_str.ends_with("KB") {
                let size = &limit_str[..limit_str.len() - 2];
                let kb = size.parse::<f64>().map_err(|_| {
                    CsvError::configuration(format!("Invalid memory limit: {}", limit_str))
                })?;
                Ok((kb * 1024.0) as usize)
            } else if limit_str.ends_with("GB") {
                let size = &limit_str[..limit_str.len() - 2];
                let gb = size.parse::<f64>().map_err(|_| {
                    CsvError::configuration(format!("Invalid memory limit: {}", limit_str))
                })?;
                Ok((gb * 1024.0 * 1024.0 * 1024.0) as usize)
            } else if limit_str.ends_with('B') {
                let size = &limit_str[..limit_str.len() - 1];
                size.parse::<usize>().map_err(|_| {
                    CsvError::configuration(format!("Invalid memory limit: {}", limit_str))
                })
            } else {
                // Assume bytes
                limit_str.parse::<usize>().map_err(|_| {
                    CsvError::configuration(format!("Invalid memory limit: {}", limit_str))
                })
            }
        }
    }
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Create a progress bar for file processing
    pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new(total);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if output should be colored
    pub fn should_use_color() -> bool {
        // Check if stdout is a terminal and supports color
        atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err()
    }

    /// Get the terminal size
    pub fn get_terminal_size() -> (u16, u16) {
        terminal_size::terminal_size()
            .map(|(width, height)| (width.0, height.0))
            .unwrap_or((80, 24))
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &CsvError) {
    let message = error.user_message();
    CliUtils::show_error(&message);

    // Provide helpful suggestions
    if error.to_string().contains("strict checking") {
        eprintln!("\nTip: Drop --strict to repair malformed quoting instead of failing");
    } else if matches!(error, CsvError::InputTooLarge { .. }) {
        eprintln!("\nTip: Use --memory-limit to increase the memory allowance");
    }

    // Show usage hint
    eprintln!("\nTry 'csvnorm --help' for usage information.");
}

/// Command execution result
pub type CliResult<T> = Result<T, CsvError>;
