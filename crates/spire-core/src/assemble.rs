//! Report assembly: merge, derive, filter, order.
//!
//! This is the pure half of the pipeline. The fetchers produce the sales
//! deltas and the three metadata maps; this module joins them into report
//! rows without touching the network.

use crate::config::ReportConfig;
use crate::types::{
    AppAllTimeSales, AppMetadata, AppSalesDelta, PublisherMetadata, ReportRow, UNKNOWN,
};
use std::collections::HashMap;

/// Merge the fetched data into the final report rows.
///
/// For each sales delta, derives the cumulative download total and the
/// contribution ratio, drops rows under `min_contribution`, joins display
/// metadata (missing entries render as [`UNKNOWN`], never drop the row),
/// and returns the result sorted by descending `units_delta`.
///
/// A zero cumulative total yields a ratio of 0.0 rather than a division
/// fault; any `min_contribution` in (0, 1) then excludes the row.
pub fn assemble_report(
    deltas: &[AppSalesDelta],
    all_time: &HashMap<String, AppAllTimeSales>,
    apps: &HashMap<String, AppMetadata>,
    publishers: &HashMap<String, PublisherMetadata>,
    config: &ReportConfig,
) -> Vec<ReportRow> {
    let cutoff = config.month.cumulative_cutoff();
    let date = config.month.to_string();

    let mut rows: Vec<ReportRow> = deltas
        .iter()
        .filter_map(|delta| {
            let cumulative = all_time
                .get(&delta.app_id)
                .map(|history| history.cumulative_through(cutoff))
                .unwrap_or(0);

            let ratio = if cumulative > 0 {
                delta.units_delta as f64 / cumulative as f64
            } else {
                0.0
            };
            if ratio < config.min_contribution {
                return None;
            }

            let meta = apps.get(&delta.app_id);
            let publisher_id = meta.and_then(|m| m.publisher_id.clone());
            let publisher_name = publisher_id
                .as_deref()
                .and_then(|id| publishers.get(id))
                .map(|p| p.publisher_name.clone());

            Some(ReportRow {
                app_id: delta.app_id.clone(),
                app_name: unknown_or(meta.and_then(|m| m.app_name.clone())),
                publisher_id: unknown_or(publisher_id),
                publisher_name: unknown_or(publisher_name),
                date: date.clone(),
                absolute_downloads: delta.units_absolute,
                delta_downloads: delta.units_delta,
                cumulative_downloads: cumulative,
                contribution_ratio: ratio,
                ios_release_date: meta.and_then(|m| m.ios_release_date),
                android_release_date: meta.and_then(|m| m.android_release_date),
                genre: unknown_or(meta.and_then(|m| m.genre.clone())),
                sub_genre: unknown_or(meta.and_then(|m| m.sub_genre.clone())),
            })
        })
        .collect();

    // Stable sort: ties keep the fetcher's order.
    rows.sort_by(|a, b| b.delta_downloads.cmp(&a.delta_downloads));
    rows
}

fn unknown_or(value: Option<String>) -> String {
    value.unwrap_or_else(|| UNKNOWN.to_string())
}
