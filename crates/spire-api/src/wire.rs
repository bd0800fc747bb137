//! Shared helpers for the provider's wire conventions.

use chrono::NaiveDate;

/// Upper bound on identifiers per batched lookup request.
pub(crate) const MAX_IDS_PER_REQUEST: usize = 100;

/// Join a batch of identifiers into the comma-separated list form the
/// lookup endpoints take.
pub(crate) fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter()
        .map(|id| id.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a provider date, tolerating both `yyyy-mm-dd` and full timestamp
/// forms by only looking at the date prefix.
pub(crate) fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_ids_with_commas() {
        assert_eq!(join_ids(&["a", "b", "c"]), "a,b,c");
        assert_eq!(join_ids::<&str>(&[]), "");
    }

    #[test]
    fn parses_plain_and_timestamp_dates() {
        let expected = NaiveDate::from_ymd_opt(2015, 6, 4).unwrap();
        assert_eq!(parse_api_date("2015-06-04"), Some(expected));
        assert_eq!(parse_api_date("2015-06-04T00:00:00Z"), Some(expected));
        assert_eq!(parse_api_date("soon"), None);
        assert_eq!(parse_api_date(""), None);
    }
}
