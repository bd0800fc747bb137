//! The report pipeline: fetch, enrich, assemble.

use async_trait::async_trait;
use spire_core::{
    assemble_report, AppAllTimeSales, AppMetadata, AppSalesDelta, PublisherMetadata, ReportConfig,
    ReportMonth, ReportRow,
};
use std::collections::HashMap;
use tracing::info;

/// The analytics provider as the pipeline sees it.
///
/// Every method degrades failure to an empty collection: a caller cannot
/// distinguish "no qualifying data" from "fetch failed" through the return
/// value, only through the logs. Partial metadata misses show up as absent
/// keys.
#[async_trait]
pub trait AnalyticsApi {
    /// Comparison sales estimates for the month, pre-filtered by
    /// `min_download` and sorted by descending `units_delta`.
    async fn month_sales(
        &self,
        month: &ReportMonth,
        category: &str,
        min_download: i64,
    ) -> Vec<AppSalesDelta>;

    /// Monthly download history per app, 2012-01 through the report month.
    async fn all_time_sales(
        &self,
        month: &ReportMonth,
        app_ids: &[String],
    ) -> HashMap<String, AppAllTimeSales>;

    /// Display metadata per app, including platform release dates.
    async fn app_metadata(&self, app_ids: &[String]) -> HashMap<String, AppMetadata>;

    /// Display names per publisher.
    async fn publisher_metadata(
        &self,
        publisher_ids: &[String],
    ) -> HashMap<String, PublisherMetadata>;
}

/// Run the whole pipeline for one report month.
///
/// Sequential by design: each fetch completes before the next starts. An
/// empty candidate set short-circuits before any enrichment call, so a
/// failed (or genuinely empty) month costs exactly one request.
pub async fn generate_report<A: AnalyticsApi + Sync>(
    api: &A,
    config: &ReportConfig,
) -> Vec<ReportRow> {
    info!(month = %config.month, category = %config.category, "querying comparison sales");
    let deltas = api
        .month_sales(&config.month, &config.category, config.min_download)
        .await;
    if deltas.is_empty() {
        info!("no apps above the download threshold, skipping enrichment");
        return Vec::new();
    }
    info!(candidates = deltas.len(), "enriching candidate apps");

    let app_ids: Vec<String> = deltas.iter().map(|d| d.app_id.clone()).collect();
    let all_time = api.all_time_sales(&config.month, &app_ids).await;
    let apps = api.app_metadata(&app_ids).await;

    let mut publisher_ids: Vec<String> = apps
        .values()
        .filter_map(|meta| meta.publisher_id.clone())
        .collect();
    publisher_ids.sort();
    publisher_ids.dedup();
    let publishers = if publisher_ids.is_empty() {
        HashMap::new()
    } else {
        api.publisher_metadata(&publisher_ids).await
    };

    assemble_report(&deltas, &all_time, &apps, &publishers, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spire_core::MonthlySales;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory provider that counts how often each operation runs.
    #[derive(Default)]
    struct FakeApi {
        deltas: Vec<AppSalesDelta>,
        all_time: HashMap<String, AppAllTimeSales>,
        apps: HashMap<String, AppMetadata>,
        publishers: HashMap<String, PublisherMetadata>,
        month_sales_calls: AtomicUsize,
        all_time_calls: AtomicUsize,
        app_metadata_calls: AtomicUsize,
        publisher_calls: AtomicUsize,
    }

    #[async_trait]
    impl AnalyticsApi for FakeApi {
        async fn month_sales(&self, _: &ReportMonth, _: &str, _: i64) -> Vec<AppSalesDelta> {
            self.month_sales_calls.fetch_add(1, Ordering::SeqCst);
            self.deltas.clone()
        }

        async fn all_time_sales(
            &self,
            _: &ReportMonth,
            _: &[String],
        ) -> HashMap<String, AppAllTimeSales> {
            self.all_time_calls.fetch_add(1, Ordering::SeqCst);
            self.all_time.clone()
        }

        async fn app_metadata(&self, _: &[String]) -> HashMap<String, AppMetadata> {
            self.app_metadata_calls.fetch_add(1, Ordering::SeqCst);
            self.apps.clone()
        }

        async fn publisher_metadata(&self, ids: &[String]) -> HashMap<String, PublisherMetadata> {
            self.publisher_calls.fetch_add(1, Ordering::SeqCst);
            self.publishers
                .iter()
                .filter(|(id, _)| ids.contains(*id))
                .map(|(id, p)| (id.clone(), p.clone()))
                .collect()
        }
    }

    fn config() -> ReportConfig {
        ReportConfig {
            month: ReportMonth::parse("2024-05").unwrap(),
            category: "6014".into(),
            min_download: 300_000,
            min_contribution: 0.4,
        }
    }

    fn delta(app_id: &str, units_absolute: i64, units_delta: i64) -> AppSalesDelta {
        AppSalesDelta {
            app_id: app_id.into(),
            units_absolute,
            units_delta,
            category: "6014".into(),
        }
    }

    fn history(app_id: &str, cumulative: i64) -> (String, AppAllTimeSales) {
        (
            app_id.to_string(),
            AppAllTimeSales {
                app_id: app_id.into(),
                monthly: vec![MonthlySales {
                    date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                    units: cumulative,
                }],
            },
        )
    }

    #[tokio::test]
    async fn empty_candidate_set_skips_every_enricher() {
        let api = FakeApi::default();

        let rows = generate_report(&api, &config()).await;

        assert!(rows.is_empty());
        assert_eq!(api.month_sales_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.all_time_calls.load(Ordering::SeqCst), 0);
        assert_eq!(api.app_metadata_calls.load(Ordering::SeqCst), 0);
        assert_eq!(api.publisher_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn full_pipeline_joins_and_filters() {
        let api = FakeApi {
            deltas: vec![delta("A", 400_000, 50_000), delta("B", 350_000, 5_000)],
            all_time: [history("A", 100_000), history("B", 1_000_000)].into(),
            apps: [(
                "A".to_string(),
                AppMetadata {
                    app_id: "A".into(),
                    app_name: Some("Clash of Cubes".into()),
                    publisher_id: Some("pub-1".into()),
                    ..Default::default()
                },
            )]
            .into(),
            publishers: [(
                "pub-1".to_string(),
                PublisherMetadata {
                    publisher_id: "pub-1".into(),
                    publisher_name: "Cube Games Ltd".into(),
                },
            )]
            .into(),
            ..Default::default()
        };

        let rows = generate_report(&api, &config()).await;

        // "B" contributes 0.005 of its lifetime downloads, below the gate.
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].app_id, "A");
        assert_eq!(rows[0].publisher_name, "Cube Games Ltd");
        assert_eq!(api.publisher_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn no_publishers_to_resolve_skips_publisher_lookup() {
        let api = FakeApi {
            deltas: vec![delta("A", 400_000, 50_000)],
            all_time: [history("A", 100_000)].into(),
            ..Default::default()
        };

        let rows = generate_report(&api, &config()).await;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].publisher_name, spire_core::UNKNOWN);
        assert_eq!(api.publisher_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rerun_with_identical_inputs_is_deterministic() {
        let api = FakeApi {
            deltas: vec![delta("A", 400_000, 50_000), delta("C", 800_000, 70_000)],
            all_time: [history("A", 100_000), history("C", 120_000)].into(),
            ..Default::default()
        };

        let first = generate_report(&api, &config()).await;
        let second = generate_report(&api, &config()).await;

        assert_eq!(first, second);
    }
}
