use crate::conversion::engine::NormalizeEngine;
use crate::conversion::{CsvConfig, CsvData, CsvResult};
use crate::parser::CsvSource;

/// Batch normalize multiple CsvSource inputs. Optionally continue on errors.
pub fn normalize_batch_sources(
    sources: Vec<CsvSource>,
    config: &CsvConfig,
    continue_on_error: bool,
) -> CsvResult<Vec<(CsvSource, CsvData)>> {
    let engine = NormalizeEngine::new(config.clone());
    let mut results = Vec::new();

    for src in sources {
        match engine.normalize_source(&src) {
            Ok(data) => results.push((src, data)),
            Err(e) => {
                if continue_on_error {
                    eprintln!("✗ Error normalizing {}: {}", src.description(), e.user_message());
                    continue;
                } else {
                    return Err(e);
                }
            }
        }
    }

    Ok(results)
}
