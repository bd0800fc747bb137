//! Tab-delimited report export.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use spire_core::ReportRow;
use std::path::Path;

/// Report column order. Fixed; consumers key off these headers.
const HEADER: [&str; 13] = [
    "App Id",
    "App Name",
    "Publisher Id",
    "Publisher Name",
    "Date",
    "Absolute (Downloads)",
    "Change (Downloads)",
    "Cumulative (Downloads)",
    "Contribute (Downloads)",
    "iOS Release Date",
    "Android Release Date",
    "Game Genre",
    "Game Sub-genre",
];

/// Write the rows as a tab-separated table, header included. An existing
/// file for the same month is overwritten.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;

    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record([
            row.app_id.clone(),
            row.app_name.clone(),
            row.publisher_id.clone(),
            row.publisher_name.clone(),
            row.date.clone(),
            row.absolute_downloads.to_string(),
            row.delta_downloads.to_string(),
            row.cumulative_downloads.to_string(),
            row.contribution_ratio.to_string(),
            format_date(row.ios_release_date),
            format_date(row.android_release_date),
            row.genre.clone(),
            row.sub_genre.clone(),
        ])?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to write report file {}", path.display()))?;
    Ok(())
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
