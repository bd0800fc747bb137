//! Error types for spire-api.

use thiserror::Error;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors a single API request can produce.
///
/// These stay internal to the pipeline: per the fetch contracts, a failed
/// request is logged and degraded to an empty result, never surfaced to the
/// pipeline's caller.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Endpoint answered with a non-success status
    #[error("API request failed with status {status}: {endpoint}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Endpoint URL, without query parameters.
        endpoint: String,
    },
}
