//! HTTP client for the hosted search index.
//!
//! Requests authenticate with static application/key headers; there is no
//! token exchange. Saving an object is an upsert keyed by `objectID`, so
//! the client never has to check whether a record already exists.

use std::time::Duration;

use anyhow::Context;
use diagnostics::*;
use serde::Deserialize;
use thiserror::Error;

use crate::config::SyncConfig;
use crate::models::PostRecord;

const TIMEOUT_SECONDS: u64 = 30;

/// A publish failure, classified for the run report.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The request never completed (connect failure, timeout).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The index answered with a non-success status.
    #[error("HTTP {status} from {url}: {body}")]
    Api {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },
    /// The index answered 2xx but not with the expected JSON.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Response to a save-object upsert.
#[derive(Debug, Deserialize)]
pub struct SaveObjectResponse {
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(rename = "taskID", default)]
    pub task_id: i64,
    #[serde(rename = "objectID")]
    pub object_id: String,
}

/// Async client for the hosted search index API.
pub struct Client {
    http_client: reqwest::Client,
    base_url: String,
    application_id: String,
    api_key: String,
}

impl Client {
    /// Create a client from explicit credentials.
    ///
    /// The endpoint derives from the application id unless the config
    /// overrides it (tests point the override at a local mock server).
    pub fn new(config: &SyncConfig) -> anyhow::Result<Self> {
        let base_url = config
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("https://{}.algolia.net", config.application_id));

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECONDS))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Client {
            http_client,
            base_url,
            application_id: config.application_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Upsert one record into the named index, keyed by its objectID.
    pub async fn save_object(
        &self,
        index: &str,
        record: &PostRecord,
    ) -> Result<SaveObjectResponse, PublishError> {
        let url = self.object_url(index, &record.object_id);
        debug!("Saving object to {url}");

        let response = self
            .http_client
            .put(&url)
            .header("X-Algolia-Application-Id", &self.application_id)
            .header("X-Algolia-API-Key", &self.api_key)
            .json(record)
            .send()
            .await
            .map_err(|source| PublishError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PublishError::Api { status, url, body });
        }

        response
            .json()
            .await
            .map_err(|source| PublishError::Decode { url, source })
    }

    /// Check the configured credentials with a cheap index listing.
    pub async fn check_credentials(&self) -> Result<(), PublishError> {
        let url = self.indexes_url();

        let response = self
            .http_client
            .get(&url)
            .header("X-Algolia-Application-Id", &self.application_id)
            .header("X-Algolia-API-Key", &self.api_key)
            .send()
            .await
            .map_err(|source| PublishError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PublishError::Api { status, url, body });
        }

        Ok(())
    }

    // URL construction helpers

    /// Object ids are percent-encoded: standard base64 may contain `/`,
    /// `+`, and `=`, none of which survive in a URL path segment.
    fn object_url(&self, index: &str, object_id: &str) -> String {
        format!(
            "{}/1/indexes/{}/{}",
            self.base_url,
            index,
            urlencoding::encode(object_id)
        )
    }

    fn indexes_url(&self) -> String {
        format!("{}/1/indexes", self.base_url)
    }
}
