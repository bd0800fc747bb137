//! App metadata fetcher.
//!
//! Combines the unified app lookup (names, publisher ids, game genres) with
//! the per-platform iOS and Android lookups that carry release dates.

use crate::client::HttpClient;
use crate::error::Result;
use crate::wire::{join_ids, parse_api_date, MAX_IDS_PER_REQUEST};
use chrono::NaiveDate;
use serde::Deserialize;
use spire_core::AppMetadata;
use std::collections::HashMap;
use tracing::warn;

const UNIFIED_APPS_URL: &str = "https://api.sensortower.com/v1/unified/apps";
const IOS_APPS_URL: &str = "https://api.sensortower.com/v1/ios/apps";
const ANDROID_APPS_URL: &str = "https://api.sensortower.com/v1/android/apps";

#[derive(Debug, Deserialize)]
struct UnifiedAppsResponse {
    #[serde(default)]
    apps: Vec<UnifiedAppEntry>,
}

#[derive(Debug, Deserialize)]
struct UnifiedAppEntry {
    app_id: String,
    name: Option<String>,
    publisher_id: Option<String>,
    #[serde(default)]
    itunes_app_ids: Vec<u64>,
    #[serde(default)]
    android_app_ids: Vec<String>,
    game_genre: Option<String>,
    game_sub_genre: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IosAppsResponse {
    #[serde(default)]
    apps: Vec<IosAppEntry>,
}

#[derive(Debug, Deserialize)]
struct IosAppEntry {
    app_id: u64,
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AndroidAppsResponse {
    #[serde(default)]
    apps: Vec<AndroidAppEntry>,
}

#[derive(Debug, Deserialize)]
struct AndroidAppEntry {
    app_id: String,
    release_date: Option<String>,
}

/// Fetch display metadata for a set of unified app ids.
///
/// Ids the provider cannot resolve are absent from the result; the
/// assembler renders them as unknown. Platform release-date lookups are
/// best-effort on top of the unified data: if they fail, the unified
/// metadata still comes back, just without dates.
pub async fn fetch_app_metadata(
    client: &HttpClient,
    token: &str,
    app_ids: &[String],
) -> HashMap<String, AppMetadata> {
    let mut entries: Vec<UnifiedAppEntry> = Vec::new();

    for batch in app_ids.chunks(MAX_IDS_PER_REQUEST) {
        let ids = join_ids(batch);
        let result: Result<UnifiedAppsResponse> = client
            .get_json(
                UNIFIED_APPS_URL,
                &[
                    ("app_id_type", "unified"),
                    ("app_ids", ids.as_str()),
                    ("auth_token", token),
                ],
            )
            .await;

        match result {
            Ok(response) => entries.extend(response.apps),
            Err(error) => {
                warn!(%error, batch_size = batch.len(), "unified app batch failed, skipping");
            }
        }
    }

    // Platform app id -> unified app id, for joining release dates back.
    let ios_owner: HashMap<u64, String> = entries
        .iter()
        .flat_map(|e| e.itunes_app_ids.iter().map(|id| (*id, e.app_id.clone())))
        .collect();
    let android_owner: HashMap<String, String> = entries
        .iter()
        .flat_map(|e| {
            e.android_app_ids
                .iter()
                .map(|id| (id.clone(), e.app_id.clone()))
        })
        .collect();

    let ios_dates = fetch_ios_release_dates(client, token, &ios_owner).await;
    let android_dates = fetch_android_release_dates(client, token, &android_owner).await;

    entries
        .into_iter()
        .map(|entry| {
            let meta = AppMetadata {
                app_id: entry.app_id.clone(),
                app_name: entry.name,
                publisher_id: entry.publisher_id,
                ios_release_date: earliest_date(&ios_dates, &entry.app_id),
                android_release_date: earliest_date(&android_dates, &entry.app_id),
                genre: entry.game_genre,
                sub_genre: entry.game_sub_genre,
            };
            (entry.app_id, meta)
        })
        .collect()
}

/// An app can ship several platform builds; report the oldest release.
fn earliest_date(dates: &HashMap<String, Vec<NaiveDate>>, app_id: &str) -> Option<NaiveDate> {
    dates.get(app_id)?.iter().min().copied()
}

async fn fetch_ios_release_dates(
    client: &HttpClient,
    token: &str,
    owner: &HashMap<u64, String>,
) -> HashMap<String, Vec<NaiveDate>> {
    let platform_ids: Vec<String> = owner.keys().map(u64::to_string).collect();
    let mut dates: HashMap<String, Vec<NaiveDate>> = HashMap::new();

    for batch in platform_ids.chunks(MAX_IDS_PER_REQUEST) {
        let ids = join_ids(batch);
        let result: Result<IosAppsResponse> = client
            .get_json(
                IOS_APPS_URL,
                &[
                    ("app_ids", ids.as_str()),
                    ("country", "US"),
                    ("auth_token", token),
                ],
            )
            .await;

        let response = match result {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, batch_size = batch.len(), "iOS app info batch failed, skipping");
                continue;
            }
        };

        for app in response.apps {
            let Some(unified_id) = owner.get(&app.app_id) else {
                continue;
            };
            if let Some(date) = app.release_date.as_deref().and_then(parse_api_date) {
                dates.entry(unified_id.clone()).or_default().push(date);
            }
        }
    }

    dates
}

async fn fetch_android_release_dates(
    client: &HttpClient,
    token: &str,
    owner: &HashMap<String, String>,
) -> HashMap<String, Vec<NaiveDate>> {
    let platform_ids: Vec<String> = owner.keys().cloned().collect();
    let mut dates: HashMap<String, Vec<NaiveDate>> = HashMap::new();

    for batch in platform_ids.chunks(MAX_IDS_PER_REQUEST) {
        let ids = join_ids(batch);
        let result: Result<AndroidAppsResponse> = client
            .get_json(
                ANDROID_APPS_URL,
                &[
                    ("app_ids", ids.as_str()),
                    ("country", "US"),
                    ("auth_token", token),
                ],
            )
            .await;

        let response = match result {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, batch_size = batch.len(), "Android app info batch failed, skipping");
                continue;
            }
        };

        for app in response.apps {
            let Some(unified_id) = owner.get(&app.app_id) else {
                continue;
            };
            if let Some(date) = app.release_date.as_deref().and_then(parse_api_date) {
                dates.entry(unified_id.clone()).or_default().push(date);
            }
        }
    }

    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earliest_date_picks_oldest_platform_release() {
        let a = NaiveDate::from_ymd_opt(2014, 3, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2012, 7, 9).unwrap();
        let dates = HashMap::from([("app".to_string(), vec![a, b])]);

        assert_eq!(earliest_date(&dates, "app"), Some(b));
        assert_eq!(earliest_date(&dates, "other"), None);
    }
}
