//! Sensor Tower API client and report pipeline.
//!
//! This crate talks to the analytics provider and drives the
//! fetch-enrich-assemble pipeline. The pure assembly logic lives in
//! `spire-core`; everything here is about the five endpoint families and
//! their failure policy.
//!
//! # Example
//!
//! ```no_run
//! use spire_api::{generate_report, SensorTowerClient};
//! use spire_core::{ReportConfig, ReportMonth};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SensorTowerClient::new("my-token")?;
//!     let config = ReportConfig {
//!         month: ReportMonth::parse("2024-05")?,
//!         category: "6014".into(),
//!         min_download: 300_000,
//!         min_contribution: 0.5,
//!     };
//!
//!     let rows = generate_report(&client, &config).await;
//!     println!("{} qualifying apps", rows.len());
//!     Ok(())
//! }
//! ```

mod alltime;
mod apps;
mod client;
mod comparison;
mod error;
mod publishers;
mod report;
mod wire;

pub use error::{Error, Result};
pub use report::{generate_report, AnalyticsApi};

use async_trait::async_trait;
use client::HttpClient;
use spire_core::{
    AppAllTimeSales, AppMetadata, AppSalesDelta, PublisherMetadata, ReportMonth,
};
use std::collections::HashMap;
use tracing::warn;

/// Live client for the Sensor Tower API.
///
/// Holds the auth token for the run; every request carries it as a query
/// parameter. One attempt per request, 30 second timeout, no rate limiting.
pub struct SensorTowerClient {
    http: HttpClient,
    token: String,
}

impl SensorTowerClient {
    /// Create a client from a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be initialized.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new()?,
            token: token.into(),
        })
    }
}

#[async_trait]
impl AnalyticsApi for SensorTowerClient {
    async fn month_sales(
        &self,
        month: &ReportMonth,
        category: &str,
        min_download: i64,
    ) -> Vec<AppSalesDelta> {
        // A failed fetch is indistinguishable from an empty month for the
        // caller; the log line is the only side channel.
        match comparison::fetch_month_sales(&self.http, &self.token, month, category, min_download)
            .await
        {
            Ok(deltas) => deltas,
            Err(error) => {
                warn!(%error, %month, category, "comparison sales fetch failed, treating as empty");
                Vec::new()
            }
        }
    }

    async fn all_time_sales(
        &self,
        month: &ReportMonth,
        app_ids: &[String],
    ) -> HashMap<String, AppAllTimeSales> {
        alltime::fetch_all_time_sales(&self.http, &self.token, month, app_ids).await
    }

    async fn app_metadata(&self, app_ids: &[String]) -> HashMap<String, AppMetadata> {
        apps::fetch_app_metadata(&self.http, &self.token, app_ids).await
    }

    async fn publisher_metadata(
        &self,
        publisher_ids: &[String],
    ) -> HashMap<String, PublisherMetadata> {
        publishers::fetch_publisher_metadata(&self.http, &self.token, publisher_ids).await
    }
}
