//! HTTP client wrapper for the ONS API and file downloads.
//!
//! Every request is a single attempt: a connection failure or non-200
//! status is fatal to the calling operation and is never retried.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{HarvesterError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("ons-harvester/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` with an explicit timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Issue a single GET request and check the response status.
///
/// # Errors
/// * `HarvesterError::Connection` for DNS/TCP/TLS failures and timeouts
/// * `HarvesterError::Status` for any non-success status code
pub fn get(client: &Client, url: &str) -> Result<Response> {
    let response = client
        .get(url)
        .send()
        .map_err(|source| HarvesterError::Connection {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvesterError::Status {
            url: url.to_string(),
            status,
        });
    }

    Ok(response)
}

/// Download a resource and write it verbatim to `path`.
///
/// Overwrites any existing file. There is no resume or checksum
/// verification; a failed download leaves no guarantee about the file.
pub fn save_to_file(client: &Client, url: &str, path: &Path) -> Result<()> {
    let response = get(client, url)?;
    let bytes = response
        .bytes()
        .map_err(|source| HarvesterError::Connection {
            url: url.to_string(),
            source,
        })?;

    std::fs::write(path, &bytes)?;
    tracing::debug!(url, path = %path.display(), bytes = bytes.len(), "Saved file");
    Ok(())
}
