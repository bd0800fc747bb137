//! All-time sales history fetcher.

use crate::client::HttpClient;
use crate::wire::{join_ids, parse_api_date, MAX_IDS_PER_REQUEST};
use serde::Deserialize;
use spire_core::{AppAllTimeSales, MonthlySales, ReportMonth};
use std::collections::HashMap;
use tracing::warn;

const ALLTIME_SALES_URL: &str = "https://api.sensortower.com/v1/unified/sales_report_estimates";

/// One month of one app's download history.
#[derive(Debug, Deserialize)]
struct SalesEstimateEntry {
    app_id: String,
    date: String,
    #[serde(rename = "unified_units", default)]
    units: i64,
}

/// Fetch each app's monthly download history from 2012-01 through the
/// report month.
///
/// Identifiers are looked up in batches; a failed batch is logged and its
/// apps are simply absent from the result, so one bad request never sinks
/// the whole enrichment. Apps the provider has no history for are likewise
/// absent, and the assembler treats them as zero cumulative downloads.
pub async fn fetch_all_time_sales(
    client: &HttpClient,
    token: &str,
    month: &ReportMonth,
    app_ids: &[String],
) -> HashMap<String, AppAllTimeSales> {
    let end_date = month.end_date();
    let mut histories: HashMap<String, AppAllTimeSales> = HashMap::new();

    for batch in app_ids.chunks(MAX_IDS_PER_REQUEST) {
        let ids = join_ids(batch);
        let result: crate::error::Result<Vec<SalesEstimateEntry>> = client
            .get_json(
                ALLTIME_SALES_URL,
                &[
                    ("app_ids", ids.as_str()),
                    ("date_granularity", "monthly"),
                    ("start_date", "2012-01-01"),
                    ("end_date", end_date.as_str()),
                    ("countries", "US"),
                    ("auth_token", token),
                ],
            )
            .await;

        let entries = match result {
            Ok(entries) => entries,
            Err(error) => {
                warn!(%error, batch_size = batch.len(), "all-time sales batch failed, skipping");
                continue;
            }
        };

        for entry in entries {
            let Some(date) = parse_api_date(&entry.date) else {
                warn!(app_id = %entry.app_id, date = %entry.date, "unparseable sales month, skipping entry");
                continue;
            };
            histories
                .entry(entry.app_id.clone())
                .or_insert_with(|| AppAllTimeSales {
                    app_id: entry.app_id,
                    monthly: Vec::new(),
                })
                .monthly
                .push(MonthlySales {
                    date,
                    units: entry.units,
                });
        }
    }

    histories
}
