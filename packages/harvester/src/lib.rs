//! ONS Harvester - Download ASHE earnings datasets from the ONS beta API.
//!
//! This crate retrieves statistical datasets from the UK Office for
//! National Statistics API, walks their nested link metadata to locate
//! downloadable observation and dimension code-list files, and downloads
//! them to a local staging area.
//!
//! # Example
//!
//! ```
//! use ons_harvester::config;
//!
//! // Validate a dataset id before building URLs with it
//! assert!(config::validate_dataset_id("cpih01").is_ok());
//! assert_eq!(
//!     config::datasets_url(config::ONS_API_URL),
//!     "https://api.beta.ons.gov.uk/v1/datasets"
//! );
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, URL builders, and validation
//! - [`types`]: API resource records (datasets, editions, versions, ...)
//! - [`error`]: Error types and Result alias
//! - [`http`]: Blocking HTTP client and file downloads
//! - [`api`]: Count-then-fetch-all collection queries
//! - [`datasets`]: Dataset discovery and keyword filtering
//! - [`versions`]: Edition and version enumeration
//! - [`downloads`]: Observation downloads and the latest-value fast path
//! - [`dimensions`]: Three-hop dimension code-list resolution
//! - [`staging`]: Bronze/silver staging-area layout
//! - [`cli`]: Command-line interface
//! - [`harvester`]: Main extraction pass

pub mod api;
pub mod cli;
pub mod config;
pub mod datasets;
pub mod dimensions;
pub mod downloads;
pub mod error;
pub mod harvester;
pub mod http;
pub mod staging;
pub mod types;
pub mod versions;

// Re-export main functions
pub use harvester::{download_latest_series, run_extraction, ExtractionReport};

// Re-export commonly used items
pub use config::validate_dataset_id;
pub use error::{HarvesterError, Result};
pub use staging::Staging;
pub use types::{Dataset, Edition, Version};
