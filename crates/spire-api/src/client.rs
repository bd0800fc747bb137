//! HTTP client wrapper for Sensor Tower requests.

use crate::error::{Error, Result};
use std::time::Duration;

/// Thin wrapper over [`reqwest::Client`] with the request defaults every
/// fetcher shares: a user agent and a bounded timeout. Each call is a single
/// attempt; there is no retry.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("spire/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request with query parameters and deserialize the JSON
    /// response. The auth token travels as a query parameter, the way the
    /// provider expects it.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.client.get(endpoint).query(query).send().await?;

        if !response.status().is_success() {
            return Err(Error::Api {
                status: response.status().as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let json = response.json().await?;
        Ok(json)
    }
}
