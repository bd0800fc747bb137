//! Report month handling.
//!
//! A report always covers one calendar month. The upstream comparison
//! endpoint is queried with the half-open window `[month-01, month-28]`;
//! day 28 is a deliberate upper bound that is valid for every month with a
//! single query shape, at the cost of ignoring days 29-31.

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// A calendar month a report is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMonth {
    year: i32,
    month: u32,
}

impl ReportMonth {
    /// Create a report month from its components.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || year < 2012 {
            return Err(Error::InvalidMonth {
                input: format!("{year}-{month:02}"),
            });
        }
        Ok(Self { year, month })
    }

    /// Parse a `yyyy-mm` string.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidMonth {
            input: input.to_string(),
        };

        let (year, month) = input.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    /// The calendar month before `today`, the default reporting month.
    pub fn previous(today: NaiveDate) -> Self {
        let (year, month) = if today.month() == 1 {
            (today.year() - 1, 12)
        } else {
            (today.year(), today.month() - 1)
        };
        // Always valid: month comes from a real date.
        Self { year, month }
    }

    /// First day of the month, `yyyy-mm-01`.
    pub fn start_date(&self) -> String {
        format!("{}-01", self)
    }

    /// Day 28 of the month, the fixed query window upper bound.
    pub fn end_date(&self) -> String {
        format!("{}-28", self)
    }

    /// The cutoff date for cumulative download sums: no sales month after
    /// this date counts toward the report.
    pub fn cumulative_cutoff(&self) -> NaiveDate {
        // Day 28 exists in every month.
        NaiveDate::from_ymd_opt(self.year, self.month, 28)
            .unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_month() {
        let month = ReportMonth::parse("2024-03").unwrap();
        assert_eq!(month.to_string(), "2024-03");
        assert_eq!(month.start_date(), "2024-03-01");
        assert_eq!(month.end_date(), "2024-03-28");
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["2024", "2024-13", "2024-0", "24-03", "march", "2024-03-01"] {
            assert!(ReportMonth::parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn previous_month_rolls_over_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(ReportMonth::previous(today).to_string(), "2024-12");

        let today = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert_eq!(ReportMonth::previous(today).to_string(), "2025-06");
    }

    #[test]
    fn cumulative_cutoff_matches_query_window() {
        let month = ReportMonth::parse("2024-02").unwrap();
        assert_eq!(
            month.cumulative_cutoff(),
            NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()
        );
    }
}
