//! Statistics and performance tracking for parsing and normalization runs

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Performance statistics for normalization operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseStatistics {
    /// Input CSV size in bytes
    pub input_size_bytes: u64,
    /// Output CSV size in bytes
    pub output_size_bytes: u64,
    /// Number of logical records parsed
    pub row_count: usize,
    /// Number of fields parsed
    pub field_count: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Number of files processed
    pub file_count: usize,
    /// Number of normalization operations
    pub operation_count: usize,
    /// Average time per operation
    pub avg_time_per_operation_ms: f32,
    /// Throughput (bytes processed per second)
    pub throughput_bytes_per_sec: f32,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl Default for ParseStatistics {
    fn default() -> Self {
        Self {
            input_size_bytes: 0,
            output_size_bytes: 0,
            row_count: 0,
            field_count: 0,
            processing_time_ms: 0,
            file_count: 0,
            operation_count: 0,
            avg_time_per_operation_ms: 0.0,
            throughput_bytes_per_sec: 0.0,
            collected_at: chrono::Utc::now(),
        }
    }
}

impl ParseStatistics {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Create statistics for a single run
    pub fn for_run(
        input_size: u64,
        output_size: u64,
        row_count: usize,
        field_count: usize,
        processing_time: Duration,
    ) -> Self {
        let processing_time_ms = processing_time.as_millis() as u64;
        let throughput_bytes_per_sec = if processing_time.as_secs_f64() > 0.0 {
            input_size as f64 / processing_time.as_secs_f64()
        } else {
            0.0
        } as f32;

        Self {
            input_size_bytes: input_size,
            output_size_bytes: output_size,
            row_count,
            field_count,
            processing_time_ms,
            file_count: 1,
            operation_count: 1,
            avg_time_per_operation_ms: processing_time_ms as f32,
            throughput_bytes_per_sec,
            collected_at: chrono::Utc::now(),
        }
    }

    /// Combine statistics from multiple operations
    pub fn combine(&mut self, other: &Self) {
        self.input_size_bytes += other.input_size_bytes;
        self.output_size_bytes += other.output_size_bytes;
        self.row_count += other.row_count;
        self.field_count += other.field_count;
        self.file_count += other.file_count;
        self.operation_count += other.operation_count;
        self.processing_time_ms += other.processing_time_ms;

        // Recalculate derived metrics
        self.avg_time_per_operation_ms = if self.operation_count > 0 {
            self.processing_time_ms as f32 / self.operation_count as f32
        } else {
            0.0
        };

        self.throughput_bytes_per_sec = if self.processing_time_ms > 0 {
            self.input_size_bytes as f32 / (self.processing_time_ms as f32 / 1000.0)
        } else {
            0.0
        };

        self.collected_at = chrono::Utc::now();
    }

    /// Get a formatted summary
    pub fn summary(&self) -> String {
        format!(
            "Processed {} files in {:.1}s - {} rows, {} fields, {:.1}MB/s throughput",
            self.file_count,
            self.processing_time_ms as f32 / 1000.0,
            self.row_count,
            self.field_count,
            self.throughput_bytes_per_sec / (1024.0 * 1024.0)
        )
    }

    /// Export to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Import from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
