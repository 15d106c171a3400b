//! Observation CSV downloads and the latest-value fast path.

use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use serde_json::Value;

use crate::api;
use crate::config::{dataset_url, validate_dataset_id};
use crate::error::{HarvesterError, Result};
use crate::http;
use crate::staging::Staging;
use crate::types::Version;

/// Download the observation CSV for every version that publishes one.
///
/// Versions without a `downloads.csv` entry are filtered out silently.
/// A failed download propagates immediately and aborts the remaining
/// batch; callers restarting the run simply overwrite completed files.
pub fn download_observations(
    client: &Client,
    versions: &[Version],
    staging: &Staging,
) -> Result<Vec<PathBuf>> {
    let mut saved = Vec::new();

    for version in versions {
        let Some(href) = version.csv_href() else {
            tracing::debug!(version = %version.id, "No CSV download listed, skipping");
            continue;
        };

        let path = staging.observation_path(&version.dataset_id, version.version);
        http::save_to_file(client, href, &path)?;
        tracing::info!(
            dataset = %version.dataset_id,
            version = version.version,
            path = %path.display(),
            "Downloaded observations"
        );
        saved.push(path);
    }

    Ok(saved)
}

/// Download the newest observation set of a single-series dataset.
///
/// Follows the dataset's `latest_version` link directly instead of
/// enumerating editions and versions, and saves the CSV verbatim to the
/// caller-known `target` path. Used for time-series datasets such as the
/// CPIH price index where only the newest observations are wanted.
pub fn download_latest(
    client: &Client,
    endpoint: &str,
    dataset_id: &str,
    target: &Path,
) -> Result<()> {
    validate_dataset_id(dataset_id)?;

    let url = dataset_url(endpoint, dataset_id);
    let dataset = api::get_json(client, &url)?;
    let latest_href = dataset
        .pointer("/links/latest_version/href")
        .and_then(Value::as_str)
        .ok_or_else(|| HarvesterError::MissingField {
            field: "links.latest_version.href",
            context: format!("response from {url}"),
        })?;

    let version = api::get_json(client, latest_href)?;
    let csv_href = version
        .pointer("/downloads/csv/href")
        .and_then(Value::as_str)
        .ok_or_else(|| HarvesterError::MissingField {
            field: "downloads.csv.href",
            context: format!("response from {latest_href}"),
        })?;

    http::save_to_file(client, csv_href, target)?;
    tracing::info!(
        dataset = dataset_id,
        path = %target.display(),
        "Downloaded latest observations"
    );
    Ok(())
}
