//! Main extraction pass that ties all components together.

use std::path::PathBuf;

use reqwest::blocking::Client;

use crate::config::{CPIH_DATASET_ID, CPIH_FILE_STEM};
use crate::datasets::search_datasets;
use crate::dimensions::download_dimensions;
use crate::downloads::{download_latest, download_observations};
use crate::error::Result;
use crate::staging::Staging;
use crate::versions::collect_versions;

/// Summary of a completed extraction pass.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Number of datasets matching the search terms.
    pub datasets: usize,

    /// Number of distinct versions resolved across all datasets.
    pub versions: usize,

    /// Observation files written to the staging area.
    pub observation_files: Vec<PathBuf>,

    /// Dimension code-list files written to the staging area.
    pub dimension_files: Vec<PathBuf>,

    /// Dimension hrefs skipped after a resolution failure.
    pub skipped_dimensions: Vec<String>,
}

/// Run one full extraction pass: search datasets, resolve versions,
/// download observation CSVs and dimension code lists.
///
/// Single-threaded and run-to-completion; an error in the primary chain
/// aborts the pass, while dimension failures are recorded as skips in
/// the report.
pub fn run_extraction(
    client: &Client,
    endpoint: &str,
    terms: &[String],
    staging: &Staging,
) -> Result<ExtractionReport> {
    staging.ensure_layout()?;

    let datasets = search_datasets(client, endpoint, terms)?;
    tracing::info!(count = datasets.len(), "Matched datasets");

    let versions = collect_versions(client, &datasets)?;
    tracing::info!(count = versions.len(), "Resolved versions");

    let observation_files = download_observations(client, &versions, staging)?;
    let dimensions = download_dimensions(client, &versions, staging)?;

    Ok(ExtractionReport {
        datasets: datasets.len(),
        versions: versions.len(),
        observation_files,
        dimension_files: dimensions.saved,
        skipped_dimensions: dimensions.skipped,
    })
}

/// Download the latest CPIH observations to their fixed staging path.
///
/// Convenience wrapper over [`download_latest`] with the well-known
/// dataset id and file stem; returns the written path.
pub fn download_latest_series(
    client: &Client,
    endpoint: &str,
    staging: &Staging,
) -> Result<PathBuf> {
    staging.ensure_layout()?;
    let target = staging.dimension_path(CPIH_FILE_STEM);
    download_latest(client, endpoint, CPIH_DATASET_ID, &target)?;
    Ok(target)
}
