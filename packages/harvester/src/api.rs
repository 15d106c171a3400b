//! Count-then-fetch-all queries against the ONS API.
//!
//! The API returns a bounded page by default. [`fetch_all`] first issues
//! an unparameterized request to learn the collection's `total_count`,
//! then reissues the request with `limit` set to that count so every
//! item arrives in one response. Every downstream resolver relies on
//! this two-step idiom; if the API ever starts rejecting oversized
//! `limit` values the whole chain must be revisited.

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::with_limit;
use crate::error::{HarvesterError, Result};
use crate::http;
use crate::types::Collection;

/// Issue a single GET request and parse the body as JSON.
pub fn get_json(client: &Client, url: &str) -> Result<Value> {
    let response = http::get(client, url)?;
    let body = response
        .text()
        .map_err(|source| HarvesterError::Connection {
            url: url.to_string(),
            source,
        })?;

    serde_json::from_str(&body).map_err(|source| HarvesterError::Json {
        url: url.to_string(),
        source,
    })
}

/// Fetch a collection resource in full.
///
/// Both requests must succeed; no partial results are returned. A
/// `total_count` of zero still issues the second request and yields an
/// empty item list without error.
pub fn fetch_all(client: &Client, url: &str) -> Result<Value> {
    let first = get_json(client, url)?;
    let total = first
        .get("total_count")
        .and_then(Value::as_u64)
        .ok_or_else(|| HarvesterError::MissingField {
            field: "total_count",
            context: format!("response from {url}"),
        })?;

    tracing::debug!(url, total, "Fetching full collection");
    get_json(client, &with_limit(url, total))
}

/// Fetch a collection resource in full and decode its items.
pub fn fetch_collection<T: DeserializeOwned>(client: &Client, url: &str) -> Result<Collection<T>> {
    let document = fetch_all(client, url)?;
    serde_json::from_value(document).map_err(|source| HarvesterError::Decode {
        context: format!("collection at {url}"),
        source,
    })
}
