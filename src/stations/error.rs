use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong while fetching the station list.
///
/// Errors stop at the data-source boundary: the browser shows them to the user and keeps
/// the last good state.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout {
        url: String,
        timeout: Duration,
        #[source]
        source: reqwest::Error,
    },

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse station list from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
