//! Core domain types for the monthly download report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Marker emitted for string fields whose metadata could not be resolved.
pub const UNKNOWN: &str = "unknown";

/// One app's estimated downloads for the report month, from the comparison
/// sales endpoint. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSalesDelta {
    /// Unified app identifier.
    pub app_id: String,
    /// Total estimated downloads over the query window. Never negative.
    pub units_absolute: i64,
    /// Change in downloads versus the previous month. Signed.
    pub units_delta: i64,
    /// Store category the row was queried under.
    pub category: String,
}

/// Estimated downloads for a single historical month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySales {
    /// First day of the sales month.
    pub date: NaiveDate,
    /// Estimated downloads for that month.
    pub units: i64,
}

/// An app's monthly download history, from 2012-01 through the report month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppAllTimeSales {
    /// Unified app identifier.
    pub app_id: String,
    /// Monthly series, in no guaranteed order.
    pub monthly: Vec<MonthlySales>,
}

impl AppAllTimeSales {
    /// Lifetime downloads up to and including `cutoff`.
    pub fn cumulative_through(&self, cutoff: NaiveDate) -> i64 {
        self.monthly
            .iter()
            .filter(|m| m.date <= cutoff)
            .map(|m| m.units)
            .sum()
    }
}

/// Display metadata for one app. Fields the provider could not resolve are
/// `None` and rendered as [`UNKNOWN`] at assembly time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Unified app identifier.
    pub app_id: String,
    /// App display name.
    pub app_name: Option<String>,
    /// Unified publisher identifier.
    pub publisher_id: Option<String>,
    /// First iOS release, if the app ships on iOS.
    pub ios_release_date: Option<NaiveDate>,
    /// First Android release, if the app ships on Android.
    pub android_release_date: Option<NaiveDate>,
    /// Game genre.
    pub genre: Option<String>,
    /// Game sub-genre.
    pub sub_genre: Option<String>,
}

/// Display metadata for one publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherMetadata {
    /// Unified publisher identifier.
    pub publisher_id: String,
    /// Publisher display name.
    pub publisher_name: String,
}

/// One line of the final report. Created once per run, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub app_id: String,
    pub app_name: String,
    pub publisher_id: String,
    pub publisher_name: String,
    /// Report month, `yyyy-mm`.
    pub date: String,
    pub absolute_downloads: i64,
    pub delta_downloads: i64,
    pub cumulative_downloads: i64,
    /// Fraction of lifetime downloads attributable to this month's delta.
    pub contribution_ratio: f64,
    pub ios_release_date: Option<NaiveDate>,
    pub android_release_date: Option<NaiveDate>,
    pub genre: String,
    pub sub_genre: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales(date: (i32, u32), units: i64) -> MonthlySales {
        MonthlySales {
            date: NaiveDate::from_ymd_opt(date.0, date.1, 1).unwrap(),
            units,
        }
    }

    #[test]
    fn cumulative_sums_only_through_cutoff() {
        let history = AppAllTimeSales {
            app_id: "a".into(),
            monthly: vec![
                sales((2023, 11), 100),
                sales((2023, 12), 200),
                sales((2024, 1), 400),
            ],
        };

        let cutoff = NaiveDate::from_ymd_opt(2023, 12, 28).unwrap();
        assert_eq!(history.cumulative_through(cutoff), 300);

        let cutoff = NaiveDate::from_ymd_opt(2024, 1, 28).unwrap();
        assert_eq!(history.cumulative_through(cutoff), 700);
    }

    #[test]
    fn cumulative_of_empty_history_is_zero() {
        let history = AppAllTimeSales {
            app_id: "a".into(),
            monthly: vec![],
        };
        assert_eq!(history.cumulative_through(NaiveDate::MAX), 0);
    }
}
