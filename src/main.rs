// Allow dead code for features exported but not yet used by the CLI
#![allow(dead_code)]

use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;

mod cli;
mod conversion;
mod error;
mod formatter;
mod parser;

use crate::cli::{handle_error, Args, CliConfig, CliResult, CliUtils, StatsFormat};
use crate::conversion::{CsvData, NormalizeEngine, ParseStatistics};
use crate::error::CsvError;
use crate::parser::directory::find_csv_files;
use crate::parser::validation::validate_csv;
use crate::parser::CsvSource;

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match CliConfig::from_args(args) {
        Ok(config) => config,
        Err(error) => {
            handle_error(&error);
            std::process::exit(2);
        }
    };

    if config.is_verbose() {
        eprintln!("Verbose mode enabled");
        eprintln!(
            "Reading from {}, writing to {}",
            config.input_description(),
            config.output_description()
        );
    }

    let outcome = if config.is_validate_only() {
        handle_validation(&config)
    } else {
        handle_conversion(&config)
    };

    if let Err(error) = outcome {
        handle_error(&error);
        std::process::exit(1);
    }

    Ok(())
}

fn handle_validation(config: &CliConfig) -> CliResult<()> {
    let csv = &config.csv_config;

    if config.args.stdin {
        let content = CsvSource::Stdin.read_content()?;
        let report = validate_csv(&content, csv.delimiter_byte(), csv.quote_byte())?;
        CliUtils::show_success(
            &format!(
                "Valid CSV ({} rows, {} fields)",
                report.row_count, report.field_count
            ),
            config.is_quiet(),
        );
        Ok(())
    } else if let Some(input) = &config.args.input {
        let path = PathBuf::from(input);
        if path.is_file() {
            validate_file(&path, config)
        } else if path.is_dir() {
            validate_directory(&path, config)
        } else {
            Err(CsvError::configuration(format!(
                "Input path does not exist: {}",
                input
            )))
        }
    } else {
        Err(CsvError::configuration(
            "No input provided. Use --stdin or provide an input path".to_string(),
        ))
    }
}

fn validate_file(path: &Path, config: &CliConfig) -> CliResult<()> {
    let csv = &config.csv_config;
    let content = std::fs::read_to_string(path)
        .map_err(|e| CsvError::io(e.to_string(), Some(path.to_path_buf())))?;

    let report = validate_csv(&content, csv.delimiter_byte(), csv.quote_byte())?;
    CliUtils::show_success(
        &format!(
            "{}: valid CSV ({} rows, {} fields)",
            path.display(),
            report.row_count,
            report.field_count
        ),
        config.is_quiet(),
    );
    Ok(())
}

fn validate_directory(dir: &Path, config: &CliConfig) -> CliResult<()> {
    let csv_files = find_csv_files(&dir.to_path_buf(), config.args.recursive)?;

    let mut first_failure: Option<CsvError> = None;
    for csv_file in csv_files {
        let relative = csv_file.strip_prefix(dir).unwrap_or(&csv_file).to_path_buf();
        match validate_file(&csv_file, config) {
            Ok(()) => {}
            Err(error) => {
                CliUtils::show_error(&format!("{}: {}", relative.display(), error.user_message()));
                if first_failure.is_none() {
                    first_failure = Some(error);
                }
                if !config.continue_on_error() {
                    break;
                }
            }
        }
    }

    match first_failure {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn handle_conversion(config: &CliConfig) -> CliResult<()> {
    if config.args.stdin {
        convert_source(&CsvSource::Stdin, config)
    } else if let Some(input) = &config.args.input {
        let path = PathBuf::from(input);
        if path.is_file() {
            convert_source(&CsvSource::File(path), config)
        } else if path.is_dir() {
            convert_directory(&path, config)
        } else {
            Err(CsvError::configuration(format!(
                "Input path does not exist: {}",
                input
            )))
        }
    } else {
        Err(CsvError::configuration(
            "No input provided. Use --stdin or provide an input path".to_string(),
        ))
    }
}

fn convert_source(source: &CsvSource, config: &CliConfig) -> CliResult<()> {
    let engine = NormalizeEngine::new(config.csv_config.clone());
    let data = engine.normalize_source(source)?;

    // Output result
    if let Some(output_path) = &config.args.output {
        write_output(output_path, &data)?;
        CliUtils::show_success(
            &format!("Normalized to: {}", output_path.display()),
            config.is_quiet(),
        );
    } else {
        print!("{}", data.content);
    }

    if config.want_stats() {
        let stats = stats_for(&data);
        output_statistics(&stats, config)?;
    }

    Ok(())
}

fn convert_directory(input_dir: &Path, config: &CliConfig) -> CliResult<()> {
    let output_dir = config.args.output.as_ref().ok_or_else(|| {
        CsvError::configuration("Output directory required for directory conversion".to_string())
    })?;

    std::fs::create_dir_all(output_dir)
        .map_err(|e| CsvError::io(e.to_string(), Some(output_dir.clone())))?;

    let csv_files = find_csv_files(&input_dir.to_path_buf(), config.args.recursive)?;

    if csv_files.is_empty() {
        CliUtils::show_warning(
            &format!("No CSV files found in {}", input_dir.display()),
            config.is_quiet(),
        );
        return Ok(());
    }

    if config.is_verbose() {
        eprintln!("Found {} CSV files", csv_files.len());
    }

    let show_progress =
        !config.is_quiet() && csv_files.len() > 1 && atty::is(atty::Stream::Stderr);
    let progress = if show_progress {
        Some(CliUtils::create_progress_bar(csv_files.len() as u64))
    } else {
        None
    };

    let engine = NormalizeEngine::new(config.csv_config.clone());
    let mut totals = ParseStatistics::default();
    let mut first_failure: Option<CsvError> = None;

    for csv_file in &csv_files {
        let relative = csv_file.strip_prefix(input_dir).unwrap_or(csv_file);
        let output_file = crate::cli::path_mapping::map_input_to_output(
            &input_dir.to_path_buf(),
            csv_file,
            output_dir,
            "csv",
        );

        let result = engine
            .normalize_source(&CsvSource::File(csv_file.clone()))
            .and_then(|data| {
                write_output(&output_file, &data)?;
                Ok(data)
            });

        match result {
            Ok(data) => {
                if let Some(pb) = &progress {
                    pb.set_message(relative.display().to_string());
                }
                totals.combine(&stats_for(&data));
            }
            Err(error) => {
                CliUtils::show_error(&format!("{}: {}", relative.display(), error.user_message()));
                if !config.continue_on_error() {
                    if let Some(pb) = &progress {
                        pb.abandon();
                    }
                    return Err(error);
                }
                if first_failure.is_none() {
                    first_failure = Some(error);
                }
            }
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    CliUtils::show_success(
        &format!("Normalized {} files to {}", csv_files.len(), output_dir.display()),
        config.is_quiet(),
    );

    if config.want_stats() {
        output_statistics(&totals, config)?;
    }

    match first_failure {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn write_output(output_path: &Path, data: &CsvData) -> CliResult<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| CsvError::io(e.to_string(), Some(parent.to_path_buf())))?;
    }
    std::fs::write(output_path, &data.content)
        .map_err(|e| CsvError::io(e.to_string(), Some(output_path.to_path_buf())))
}

fn stats_for(data: &CsvData) -> ParseStatistics {
    ParseStatistics::for_run(
        data.metadata.input_size,
        data.metadata.output_size,
        data.metadata.row_count,
        data.metadata.field_count,
        Duration::from_millis(data.metadata.processing_time_ms),
    )
}

fn output_statistics(stats: &ParseStatistics, config: &CliConfig) -> CliResult<()> {
    if config.is_quiet() {
        return Ok(());
    }

    match config.args.stats_format {
        StatsFormat::Json => {
            let json = stats
                .to_json()
                .map_err(|e| CsvError::configuration(format!("Failed to encode stats: {}", e)))?;
            eprintln!("{}", json);
        }
        StatsFormat::Text => {
            eprintln!("\nParsing Statistics:");
            eprintln!(
                "Input size: {}",
                CliUtils::format_file_size(stats.input_size_bytes)
            );
            eprintln!(
                "Output size: {}",
                CliUtils::format_file_size(stats.output_size_bytes)
            );
            eprintln!("Rows: {}", stats.row_count);
            eprintln!("Fields: {}", stats.field_count);
            eprintln!(
                "Processing time: {}",
                CliUtils::format_duration(Duration::from_millis(stats.processing_time_ms))
            );
        }
    }

    Ok(())
}
