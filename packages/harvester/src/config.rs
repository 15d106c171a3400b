//! Configuration constants and validation functions for the harvester.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvesterError, Result};

/// Base URL for the ONS beta API.
pub const ONS_API_URL: &str = "https://api.beta.ons.gov.uk/v1";

/// HTTP timeout in seconds.
///
/// Set to 30 seconds to accommodate large observation files and slow
/// connections. Expiry surfaces as a connection failure.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default keyword terms used to select relevant datasets.
///
/// Matches the Annual Survey of Hours and Earnings (ASHE) family.
pub const DEFAULT_SEARCH_TERMS: &[&str] = &["ashe", "earnings"];

/// Dataset id of the CPIH price index, used by the latest-value fast path.
pub const CPIH_DATASET_ID: &str = "cpih01";

/// Fixed file stem for the CPIH latest observations file.
pub const CPIH_FILE_STEM: &str = "cpih";

/// Dataset id pattern: lowercase slug, e.g. "ashe-tables-7-and-8".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATASET_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("valid regex"));

/// Validate dataset id format.
///
/// # Examples
/// ```
/// use ons_harvester::config::validate_dataset_id;
///
/// assert!(validate_dataset_id("cpih01").is_ok());
/// assert!(validate_dataset_id("ashe-tables-7-and-8").is_ok());
/// assert!(validate_dataset_id("Not A Slug").is_err());
/// ```
pub fn validate_dataset_id(dataset_id: &str) -> Result<()> {
    if DATASET_ID_PATTERN.is_match(dataset_id) {
        Ok(())
    } else {
        Err(HarvesterError::InvalidDatasetId(dataset_id.to_string()))
    }
}

/// Build the dataset collection URL.
pub fn datasets_url(endpoint: &str) -> String {
    format!("{}/datasets", endpoint.trim_end_matches('/'))
}

/// Build a single dataset resource URL.
///
/// # Panics
/// Debug builds panic if `dataset_id` doesn't match the expected format.
pub fn dataset_url(endpoint: &str, dataset_id: &str) -> String {
    debug_assert!(
        DATASET_ID_PATTERN.is_match(dataset_id),
        "dataset_id should be validated before calling dataset_url"
    );
    format!("{}/datasets/{dataset_id}", endpoint.trim_end_matches('/'))
}

/// Append a `limit` query parameter to a collection URL.
pub fn with_limit(url: &str, limit: u64) -> String {
    if url.contains('?') {
        format!("{url}&limit={limit}")
    } else {
        format!("{url}?limit={limit}")
    }
}

/// Derive a dimension name from a code-list URL.
///
/// Takes the path segment following `code-lists`, e.g.
/// `.../v1/code-lists/sex/editions/one-off/codes` yields `sex`. Used only
/// as a fallback when the dimension descriptor carries no declared name.
pub fn codelist_name_from_href(href: &str) -> Option<String> {
    let mut segments = href.split('/');
    segments
        .by_ref()
        .find(|segment| *segment == "code-lists")?;
    segments
        .next()
        .filter(|name| !name.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dataset_id_valid() {
        assert!(validate_dataset_id("cpih01").is_ok());
        assert!(validate_dataset_id("ashe-table-25").is_ok());
        assert!(validate_dataset_id("a").is_ok());
    }

    #[test]
    fn test_validate_dataset_id_invalid() {
        assert!(validate_dataset_id("").is_err());
        assert!(validate_dataset_id("-leading-dash").is_err());
        assert!(validate_dataset_id("Upper").is_err());
        assert!(validate_dataset_id("has space").is_err());
        assert!(validate_dataset_id("under_score").is_err());
    }

    #[test]
    fn test_datasets_url() {
        assert_eq!(
            datasets_url("https://api.beta.ons.gov.uk/v1"),
            "https://api.beta.ons.gov.uk/v1/datasets"
        );
        // Trailing slash is tolerated
        assert_eq!(
            datasets_url("https://api.beta.ons.gov.uk/v1/"),
            "https://api.beta.ons.gov.uk/v1/datasets"
        );
    }

    #[test]
    fn test_dataset_url() {
        assert_eq!(
            dataset_url("https://api.beta.ons.gov.uk/v1", "cpih01"),
            "https://api.beta.ons.gov.uk/v1/datasets/cpih01"
        );
    }

    #[test]
    fn test_with_limit() {
        assert_eq!(
            with_limit("http://x/datasets", 42),
            "http://x/datasets?limit=42"
        );
        assert_eq!(
            with_limit("http://x/datasets?offset=0", 42),
            "http://x/datasets?offset=0&limit=42"
        );
    }

    #[test]
    fn test_codelist_name_from_href() {
        assert_eq!(
            codelist_name_from_href(
                "https://api.beta.ons.gov.uk/v1/code-lists/calendar-years/editions/one-off/codes"
            ),
            Some("calendar-years".to_string())
        );
        assert_eq!(
            codelist_name_from_href("https://api.beta.ons.gov.uk/v1/datasets/cpih01"),
            None
        );
        assert_eq!(codelist_name_from_href("http://x/code-lists/"), None);
    }
}
