//! Dimension code-list resolution and download.
//!
//! Each dimension descriptor points at a code-list resource that must be
//! unwrapped through three hops: the descriptor href yields a document
//! whose `links.editions` href lists the code list's editions, and each
//! edition's `links.codes` href finally yields the actual code rows.
//!
//! Dimension metadata is not uniform across datasets, so this is the
//! most failure-prone part of the whole extraction. Any hop that fails
//! (network, status, or a document missing the expected key) is treated
//! as a recoverable skip: the offending dimension is logged and sibling
//! dimensions continue.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use serde_json::Value;

use crate::api;
use crate::config::codelist_name_from_href;
use crate::error::{HarvesterError, Result};
use crate::staging::Staging;
use crate::types::{CodeItem, Collection, Version};

/// A dimension to resolve: the declared name (if any) and the href into
/// the code-list chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionRef {
    pub name: Option<String>,
    pub href: String,
}

/// Outcome of a dimension download pass.
#[derive(Debug, Default)]
pub struct DimensionOutcome {
    /// Code-list files written, one per distinct dimension.
    pub saved: Vec<PathBuf>,

    /// Hrefs of dimensions skipped after a resolution failure.
    pub skipped: Vec<String>,
}

/// Collect dimension descriptors across all versions, deduplicated by
/// href.
///
/// Many versions share the same dimension (sex, calendar-years, ...);
/// deduplicating before the fetch avoids redundant downloads and gives
/// the one-file-per-dimension output contract.
pub fn collect_dimensions(versions: &[Version]) -> Vec<DimensionRef> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut dimensions = Vec::new();

    for version in versions {
        for descriptor in &version.dimensions {
            if seen.insert(descriptor.href.clone()) {
                dimensions.push(DimensionRef {
                    name: descriptor.name.clone(),
                    href: descriptor.href.clone(),
                });
            }
        }
    }

    dimensions
}

/// Resolve and download the code list of every distinct dimension.
///
/// Failures are per-dimension skips, never fatal to the pass.
pub fn download_dimensions(
    client: &Client,
    versions: &[Version],
    staging: &Staging,
) -> Result<DimensionOutcome> {
    let dimensions = collect_dimensions(versions);
    tracing::info!(count = dimensions.len(), "Resolving dimensions");

    let mut outcome = DimensionOutcome::default();
    for dimension in &dimensions {
        match download_one(client, dimension, staging) {
            Ok(mut paths) => outcome.saved.append(&mut paths),
            Err(error) => {
                tracing::warn!(
                    dimension = %dimension.href,
                    error = %error,
                    "Skipping dimension after resolution failure"
                );
                outcome.skipped.push(dimension.href.clone());
            }
        }
    }

    Ok(outcome)
}

/// Resolve a single dimension through the three-hop chain and write its
/// code list(s).
fn download_one(
    client: &Client,
    dimension: &DimensionRef,
    staging: &Staging,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for codes_href in resolve_codes_hrefs(client, dimension)? {
        let Some(name) = dimension_name(dimension, &codes_href) else {
            tracing::warn!(href = %codes_href, "Cannot derive a dimension name, skipping");
            continue;
        };

        let collection: Collection<CodeItem> = api::fetch_collection(client, &codes_href)?;
        if collection.items.is_empty() {
            tracing::warn!(dimension = %name, href = %codes_href, "Code list is empty");
        }

        let path = staging.dimension_path(&name);
        write_code_list(&collection.items, &name, &path)?;
        tracing::info!(dimension = %name, codes = collection.items.len(), "Downloaded code list");
        paths.push(path);
    }

    Ok(paths)
}

/// Hop 1 and 2: descriptor href -> `links.editions` -> edition items ->
/// each `links.codes.href`.
fn resolve_codes_hrefs(client: &Client, dimension: &DimensionRef) -> Result<Vec<String>> {
    let document = api::get_json(client, &dimension.href)?;
    let editions_href = document
        .pointer("/links/editions/href")
        .and_then(Value::as_str)
        .ok_or_else(|| HarvesterError::MissingField {
            field: "links.editions.href",
            context: format!("response from {}", dimension.href),
        })?;

    let editions = api::fetch_all(client, editions_href)?;
    let items = editions
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| HarvesterError::MissingField {
            field: "items",
            context: format!("response from {editions_href}"),
        })?;

    let mut hrefs = Vec::new();
    for item in items {
        match item.pointer("/links/codes/href").and_then(Value::as_str) {
            Some(href) => hrefs.push(href.to_string()),
            None => tracing::warn!(
                dimension = %dimension.href,
                "Code-list edition without links.codes.href, skipping"
            ),
        }
    }

    Ok(hrefs)
}

/// Pick the dimension's name: the declared name field when present,
/// otherwise the `code-lists/<name>` segment of the codes URL.
pub(crate) fn dimension_name(dimension: &DimensionRef, codes_href: &str) -> Option<String> {
    if let Some(name) = &dimension.name {
        if !name.is_empty() {
            return Some(name.clone());
        }
    }
    codelist_name_from_href(codes_href)
}

/// Write code rows as `code,label,dimension` CSV.
fn write_code_list(items: &[CodeItem], dimension: &str, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["code", "label", "dimension"])?;
    for item in items {
        writer.write_record([item.code.as_str(), item.label.as_str(), dimension])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn version_with_dims(id: &str, dims: &[(&str, &str)]) -> Version {
        let dims: Vec<_> = dims
            .iter()
            .map(|(name, href)| serde_json::json!({"name": name, "href": href}))
            .collect();
        serde_json::from_value(serde_json::json!({"id": id, "dimensions": dims})).unwrap()
    }

    #[test]
    fn test_collect_dimensions_dedups_by_href() {
        let versions = vec![
            version_with_dims("v1", &[("sex", "http://x/d/sex"), ("time", "http://x/d/time")]),
            version_with_dims("v2", &[("sex", "http://x/d/sex")]),
        ];

        let dims = collect_dimensions(&versions);
        let hrefs: Vec<&str> = dims.iter().map(|d| d.href.as_str()).collect();
        assert_eq!(hrefs, vec!["http://x/d/sex", "http://x/d/time"]);
    }

    #[test]
    fn test_dimension_name_prefers_declared_name() {
        let dimension = DimensionRef {
            name: Some("sex".to_string()),
            href: "http://x/d/sex".to_string(),
        };
        assert_eq!(
            dimension_name(&dimension, "http://x/code-lists/something-else/codes"),
            Some("sex".to_string())
        );
    }

    #[test]
    fn test_dimension_name_falls_back_to_url() {
        let dimension = DimensionRef {
            name: None,
            href: "http://x/d/years".to_string(),
        };
        assert_eq!(
            dimension_name(
                &dimension,
                "http://x/v1/code-lists/calendar-years/editions/one-off/codes"
            ),
            Some("calendar-years".to_string())
        );

        let empty_name = DimensionRef {
            name: Some(String::new()),
            href: "http://x/d/years".to_string(),
        };
        assert_eq!(
            dimension_name(&empty_name, "http://x/v1/code-lists/calendar-years/codes"),
            Some("calendar-years".to_string())
        );
    }

    #[test]
    fn test_dimension_name_unparseable_url() {
        let dimension = DimensionRef {
            name: None,
            href: "http://x/d/mystery".to_string(),
        };
        assert_eq!(dimension_name(&dimension, "http://x/no-code-lists-here"), None);
    }

    #[test]
    fn test_write_code_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sex.csv");

        let items: Vec<CodeItem> = serde_json::from_value(serde_json::json!([
            {"code": "F", "label": "Female"},
            {"code": "M", "label": "Male"}
        ]))
        .unwrap();

        write_code_list(&items, "sex", &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "code,label,dimension\nF,Female,sex\nM,Male,sex\n");
    }
}
