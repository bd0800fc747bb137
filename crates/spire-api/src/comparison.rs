//! Monthly comparison sales fetcher.
//!
//! Queries the provider's comparison endpoint for one month of download
//! estimates per app in a category, the candidate set everything else in the
//! pipeline hangs off.

use crate::client::HttpClient;
use crate::error::Result;
use serde::Deserialize;
use spire_core::{AppSalesDelta, ReportMonth};

const COMPARISON_URL: &str =
    "https://api.sensortower.com/v1/unified/sales_report_estimates_comparison_attributes";

/// Comparison endpoint response entry. Fields we do not use are ignored.
#[derive(Debug, Deserialize)]
struct ComparisonEntry {
    app_id: String,
    #[serde(default)]
    units_absolute: i64,
    #[serde(default)]
    units_delta: i64,
}

/// Fetch the month's comparison sales estimates for a category.
///
/// Returns rows with `units_absolute >= min_download`, sorted by descending
/// `units_delta`. Filtering here keeps apps below the download threshold out
/// of every downstream metadata call.
///
/// The query window is `[month-01, month-28]`: day 28 exists in every month,
/// so one query shape covers all of them, at the cost of days 29-31.
pub async fn fetch_month_sales(
    client: &HttpClient,
    token: &str,
    month: &ReportMonth,
    category: &str,
    min_download: i64,
) -> Result<Vec<AppSalesDelta>> {
    let start_date = month.start_date();
    let end_date = month.end_date();

    let entries: Vec<ComparisonEntry> = client
        .get_json(
            COMPARISON_URL,
            &[
                ("comparison_attribute", "delta"),
                ("time_range", "month"),
                ("measure", "units"),
                ("device_type", "total"),
                ("category", category),
                ("date", start_date.as_str()),
                ("end_date", end_date.as_str()),
                ("country", "US"),
                ("limit", "2000"),
                ("custom_tags_mode", "include_unified_apps"),
                ("auth_token", token),
            ],
        )
        .await?;

    let mut deltas: Vec<AppSalesDelta> = entries
        .into_iter()
        .filter(|entry| entry.units_absolute >= min_download)
        .map(|entry| AppSalesDelta {
            app_id: entry.app_id,
            units_absolute: entry.units_absolute,
            units_delta: entry.units_delta,
            category: category.to_string(),
        })
        .collect();

    // Best-selling movers first.
    deltas.sort_by(|a, b| b.units_delta.cmp(&a.units_delta));

    Ok(deltas)
}
