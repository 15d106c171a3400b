//! Edition and version enumeration for matched datasets.
//!
//! The primary resolution chain (dataset -> editions -> versions) treats
//! a missing link as fatal: these documents come straight from the
//! dataset collection and are expected to be well formed. Empty
//! collections are logged and skipped, since a dataset may legitimately
//! have nothing published yet.

use std::collections::HashSet;

use reqwest::blocking::Client;

use crate::api;
use crate::error::{HarvesterError, Result};
use crate::types::{Collection, Dataset, Edition, Version};

/// Enumerate all versions of a dataset, across all of its editions.
///
/// Every edition is processed; there is no latest-only shortcut here
/// (that belongs to the latest-value fast path in [`crate::downloads`]).
pub fn versions_for_dataset(client: &Client, dataset: &Dataset) -> Result<Vec<Version>> {
    let editions_href = dataset
        .links
        .editions
        .as_ref()
        .map(|link| link.href.as_str())
        .ok_or_else(|| HarvesterError::MissingField {
            field: "links.editions",
            context: format!("dataset '{}'", dataset.id),
        })?;

    let editions: Collection<Edition> = api::fetch_collection(client, editions_href)?;
    if editions.items.is_empty() {
        tracing::warn!(dataset = %dataset.id, "Dataset has no editions");
    }

    let mut versions = Vec::new();
    for edition in &editions.items {
        let versions_href = edition
            .links
            .versions
            .as_ref()
            .map(|link| link.href.as_str())
            .ok_or_else(|| HarvesterError::MissingField {
                field: "links.versions",
                context: format!("edition '{}' of dataset '{}'", edition.edition, dataset.id),
            })?;

        let page: Collection<Version> = api::fetch_collection(client, versions_href)?;
        if page.items.is_empty() {
            tracing::warn!(
                dataset = %dataset.id,
                edition = %edition.edition,
                "Edition has no versions"
            );
        }
        versions.extend(page.items);
    }

    Ok(versions)
}

/// Enumerate and flatten versions for every dataset, deduplicated by
/// version id.
///
/// The same version can be reachable through multiple link paths, so
/// deduplication after the flatten is required.
pub fn collect_versions(client: &Client, datasets: &[Dataset]) -> Result<Vec<Version>> {
    let mut all = Vec::new();
    for dataset in datasets {
        all.extend(versions_for_dataset(client, dataset)?);
    }
    Ok(dedup_versions(all))
}

/// Drop versions whose id has already been seen, preserving order.
pub(crate) fn dedup_versions(versions: Vec<Version>) -> Vec<Version> {
    let mut seen: HashSet<String> = HashSet::new();
    versions
        .into_iter()
        .filter(|version| seen.insert(version.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(id: &str) -> Version {
        serde_json::from_value(serde_json::json!({ "id": id })).unwrap()
    }

    #[test]
    fn test_dedup_versions() {
        let deduped = dedup_versions(vec![
            version("v1"),
            version("v2"),
            version("v1"),
            version("v3"),
            version("v2"),
        ]);
        let ids: Vec<&str> = deduped.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v2", "v3"]);
    }

    #[test]
    fn test_dedup_versions_total() {
        let deduped = dedup_versions(vec![version("v1"), version("v1"), version("v1")]);
        assert_eq!(deduped.len(), 1);
    }
}
