//! ONS Pipeline - Clean staged ONS extracts into silver tables.
//!
//! The harvester stages raw observation and dimension CSV files in a
//! bronze area; this crate loads them, applies per-table cleaning rules,
//! and writes the results to the silver area. Tables without a
//! registered rule pass through unmodified.
//!
//! # Architecture
//!
//! - [`table`]: In-memory string table with the cleaning operations
//! - [`clean`]: Declarative per-table cleaning rules
//! - [`silver`]: The bronze-to-silver transform pass
//! - [`error`]: Error types and Result alias

pub mod clean;
pub mod error;
pub mod silver;
pub mod table;

// Re-export main functions
pub use silver::{run_transform, TransformReport};

// Re-export commonly used items
pub use clean::CleaningRule;
pub use error::{PipelineError, Result};
pub use table::Table;
