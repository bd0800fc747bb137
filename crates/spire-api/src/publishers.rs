//! Publisher metadata fetcher.

use crate::client::HttpClient;
use crate::error::Result;
use crate::wire::{join_ids, MAX_IDS_PER_REQUEST};
use serde::Deserialize;
use spire_core::PublisherMetadata;
use std::collections::HashMap;
use tracing::warn;

const PUBLISHERS_URL: &str = "https://api.sensortower.com/v1/unified/publishers";

#[derive(Debug, Deserialize)]
struct PublishersResponse {
    #[serde(default)]
    publishers: Vec<PublisherEntry>,
}

#[derive(Debug, Deserialize)]
struct PublisherEntry {
    publisher_id: String,
    publisher_name: Option<String>,
}

/// Fetch display names for a set of unified publisher ids.
///
/// Ids without a resolvable name are absent from the result and rendered
/// as unknown downstream.
pub async fn fetch_publisher_metadata(
    client: &HttpClient,
    token: &str,
    publisher_ids: &[String],
) -> HashMap<String, PublisherMetadata> {
    let mut publishers: HashMap<String, PublisherMetadata> = HashMap::new();

    for batch in publisher_ids.chunks(MAX_IDS_PER_REQUEST) {
        let ids = join_ids(batch);
        let result: Result<PublishersResponse> = client
            .get_json(
                PUBLISHERS_URL,
                &[
                    ("publisher_id_type", "unified"),
                    ("publisher_ids", ids.as_str()),
                    ("auth_token", token),
                ],
            )
            .await;

        let response = match result {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, batch_size = batch.len(), "publisher batch failed, skipping");
                continue;
            }
        };

        for entry in response.publishers {
            let Some(publisher_name) = entry.publisher_name else {
                continue;
            };
            publishers.insert(
                entry.publisher_id.clone(),
                PublisherMetadata {
                    publisher_id: entry.publisher_id,
                    publisher_name,
                },
            );
        }
    }

    publishers
}
