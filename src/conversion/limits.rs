use crate::conversion::config::CsvConfig;
use crate::conversion::CsvResult;
use crate::error::CsvError;
use crate::parser::CsvSource;

/// Check the source size before attempting to read the CSV document.
/// This avoids loading very large files into memory if the user-configured
/// limit is smaller than the file.
pub fn check_source_size_before_read(source: &CsvSource, config: &CsvConfig) -> CsvResult<()> {
    if let Some(size) = source.estimated_size() {
        if size > config.memory_limit as u64 {
            return Err(CsvError::InputTooLarge {
                size: size as usize,
                limit: config.memory_limit,
            });
        }
    }

    Ok(())
}

/// Check an already-read document against the configured limit. Needed for
/// stdin, where the size is unknown until the stream has been read.
pub fn check_content_size(content: &str, config: &CsvConfig) -> CsvResult<()> {
    if content.len() > config.memory_limit {
        return Err(CsvError::InputTooLarge {
            size: content.len(),
            limit: config.memory_limit,
        });
    }

    Ok(())
}
