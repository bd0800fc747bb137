//! Resolved report parameters.

use crate::error::{Error, Result};
use crate::month::ReportMonth;

/// Everything a single report run needs, resolved once at startup and
/// passed explicitly to the pipeline.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Month the report covers.
    pub month: ReportMonth,
    /// Store category to query, e.g. `6014` for iOS games.
    pub category: String,
    /// Minimum `units_absolute` an app needs to be considered at all.
    pub min_download: i64,
    /// Minimum contribution ratio, in (0, 1). Final filter gate.
    pub min_contribution: f64,
}

impl ReportConfig {
    /// Check threshold ranges.
    pub fn validate(&self) -> Result<()> {
        if self.min_download < 0 {
            return Err(Error::InvalidConfig {
                message: format!("min-download must be non-negative, got {}", self.min_download),
            });
        }
        if !(self.min_contribution > 0.0 && self.min_contribution < 1.0) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "min-contribution must be in (0, 1), got {}",
                    self.min_contribution
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min_download: i64, min_contribution: f64) -> ReportConfig {
        ReportConfig {
            month: ReportMonth::parse("2024-05").unwrap(),
            category: "6014".into(),
            min_download,
            min_contribution,
        }
    }

    #[test]
    fn accepts_defaults() {
        assert!(config(300_000, 0.5).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        assert!(config(-1, 0.5).validate().is_err());
        assert!(config(0, 0.0).validate().is_err());
        assert!(config(0, 1.0).validate().is_err());
        assert!(config(0, 1.5).validate().is_err());
    }
}
