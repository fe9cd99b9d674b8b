//! Remote store client
//!
//! The texts and their tags live in an external managed store reached over a
//! PostgREST-style HTTP API. This module defines the `TextStore` seam the
//! rest of the front-end depends on, plus the production `RestStoreClient`.
//!
//! The store is the sole arbiter of write ordering and identity assignment:
//! the client performs no validation, no retries, and no de-duplication of
//! concurrent inserts.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use lt_common::models::{NewText, Text, TextWithTags};

const USER_AGENT: &str = concat!("lt-ui/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Remote store client errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network communication error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Store API returned error response
    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    /// Failed to parse API response JSON
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Operations the front-end needs from the remote store
///
/// Injected into `TextService` at startup so tests can substitute a mock.
#[async_trait]
pub trait TextStore: Send + Sync {
    /// Insert a new text; the store assigns id and timestamps
    ///
    /// `Ok(None)` means the store reported success but returned no created
    /// record. The caller decides what that means (it is never a success).
    async fn insert_text(&self, content: &str) -> Result<Option<Text>, StoreError>;

    /// Fetch the denormalized texts-with-tags projection, newest first
    async fn list_texts_with_tags(&self) -> Result<Vec<TextWithTags>, StoreError>;
}

/// HTTP client for the managed store's REST API
pub struct RestStoreClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStoreClient {
    /// Create new store client
    ///
    /// One configured client is built at startup and reused across calls.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, StoreError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        let base_url = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http_client,
        })
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, resource)
    }
}

#[async_trait]
impl TextStore for RestStoreClient {
    async fn insert_text(&self, content: &str) -> Result<Option<Text>, StoreError> {
        let url = self.endpoint("texts");

        tracing::debug!(url = %url, "inserting text");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            // PostgREST: return the created row(s) in the response body
            .header("Prefer", "return=representation")
            .json(&[NewText {
                content: content.to_string(),
            }])
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoreError::ApiError(status.as_u16(), error_text));
        }

        let mut rows: Vec<Text> = response
            .json()
            .await
            .map_err(|e| StoreError::ParseError(e.to_string()))?;

        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }

    async fn list_texts_with_tags(&self) -> Result<Vec<TextWithTags>, StoreError> {
        let url = self.endpoint("texts_with_tags");

        tracing::debug!(url = %url, "fetching texts with tags");

        let response = self
            .http_client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoreError::ApiError(status.as_u16(), error_text));
        }

        let texts: Vec<TextWithTags> = response
            .json()
            .await
            .map_err(|e| StoreError::ParseError(e.to_string()))?;

        tracing::debug!(count = texts.len(), "texts fetched");

        Ok(texts)
    }
}
