//! Dataset discovery and keyword filtering.

use std::collections::HashSet;

use reqwest::blocking::Client;

use crate::api;
use crate::config::datasets_url;
use crate::error::Result;
use crate::types::{Collection, Dataset};

/// Fetch the dataset collection and keep the datasets whose keywords
/// match any of the search terms.
///
/// Matching is a case-insensitive substring test, and the result is the
/// union over terms, so it is independent of term ordering. The returned
/// list is deduplicated by dataset id.
pub fn search_datasets(client: &Client, endpoint: &str, terms: &[String]) -> Result<Vec<Dataset>> {
    let url = datasets_url(endpoint);
    let collection: Collection<Dataset> = api::fetch_collection(client, &url)?;
    if collection.items.is_empty() {
        tracing::warn!(url, "Dataset collection is empty");
    }

    Ok(filter_datasets(collection.items, terms))
}

/// Keep datasets whose keyword list contains any search term, dedup by id.
pub(crate) fn filter_datasets(datasets: Vec<Dataset>, terms: &[String]) -> Vec<Dataset> {
    let mut seen: HashSet<String> = HashSet::new();
    datasets
        .into_iter()
        .filter(|dataset| matches_any(dataset, terms) && seen.insert(dataset.id.clone()))
        .collect()
}

/// Case-insensitive substring match of any term against any keyword.
///
/// Datasets without a keyword list never match.
fn matches_any(dataset: &Dataset, terms: &[String]) -> bool {
    let Some(keywords) = &dataset.keywords else {
        return false;
    };

    keywords.iter().any(|keyword| {
        let keyword = keyword.to_lowercase();
        terms
            .iter()
            .any(|term| keyword.contains(&term.to_lowercase()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(id: &str, keywords: Option<&[&str]>) -> Dataset {
        let body = serde_json::json!({
            "id": id,
            "title": id,
            "keywords": keywords,
            "links": {}
        });
        serde_json::from_value(body).unwrap()
    }

    fn terms(values: &[&str]) -> Vec<String> {
        values.iter().map(|t| (*t).to_string()).collect()
    }

    fn ids(datasets: &[Dataset]) -> Vec<&str> {
        datasets.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_filter_union_of_terms() {
        let datasets = vec![
            dataset("a", Some(&["ashe", "hours"])),
            dataset("b", Some(&["average weekly earnings"])),
            dataset("c", Some(&["population"])),
        ];

        let matched = filter_datasets(datasets, &terms(&["ashe", "earnings"]));
        assert_eq!(ids(&matched), vec!["a", "b"]);
    }

    #[test]
    fn test_filter_case_insensitive() {
        let datasets = vec![dataset("a", Some(&["ASHE Tables"]))];
        let matched = filter_datasets(datasets, &terms(&["ashe"]));
        assert_eq!(matched.len(), 1);

        let datasets = vec![dataset("a", Some(&["ashe tables"]))];
        let matched = filter_datasets(datasets, &terms(&["ASHE"]));
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_filter_order_independent() {
        let build = || {
            vec![
                dataset("a", Some(&["ashe"])),
                dataset("b", Some(&["earnings"])),
                dataset("c", Some(&["weather"])),
            ]
        };

        let forward = filter_datasets(build(), &terms(&["ashe", "earnings"]));
        let reverse = filter_datasets(build(), &terms(&["earnings", "ashe"]));
        assert_eq!(ids(&forward), ids(&reverse));
    }

    #[test]
    fn test_filter_idempotent() {
        let matched = filter_datasets(
            vec![dataset("a", Some(&["ashe"])), dataset("b", Some(&["rain"]))],
            &terms(&["ashe"]),
        );
        let again = filter_datasets(matched.clone(), &terms(&["ashe"]));
        assert_eq!(ids(&matched), ids(&again));
    }

    #[test]
    fn test_filter_dedup_by_id() {
        let datasets = vec![
            dataset("a", Some(&["ashe"])),
            dataset("a", Some(&["earnings"])),
        ];
        let matched = filter_datasets(datasets, &terms(&["ashe", "earnings"]));
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_filter_missing_keywords_never_match() {
        let datasets = vec![dataset("a", None), dataset("b", Some(&[]))];
        let matched = filter_datasets(datasets, &terms(&["ashe"]));
        assert!(matched.is_empty());
    }
}
