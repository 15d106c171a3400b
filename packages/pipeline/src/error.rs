//! Error types for the pipeline.

use thiserror::Error;

/// Main error type for the pipeline library.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// IO error reading or writing staged files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse or write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A cleaning rule referenced a column the staged table lacks.
    #[error("Table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },

    /// A month value did not match the expected `mmm-yy` shape.
    #[error("Cannot parse '{value}' in column '{column}' as a month (expected e.g. Mar-21)")]
    MonthParse { column: String, value: String },

    /// Extraction failure surfaced through the driver.
    #[error(transparent)]
    Harvester(#[from] ons_harvester::HarvesterError),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
