//! Typed client for the ProdSentinel query API.
//!
//! Issues single-shot paginated queries; no retries and no fallback pages.
//! Every failure propagates to the caller as a distinguishable [`ApiError`].

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ApiError;
use super::types::{AnalysisResult, Incident, Paginated, Signal};

/// Convert a 1-based page number to a zero-based item offset.
///
/// `page` is 1-based; page 0 is treated the same as page 1 so the offset
/// never goes negative.
pub fn page_offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1) * page_size
}

/// Client for the read-only query endpoints.
///
/// The base URL is an explicit constructor argument; nothing is read from
/// the process environment here.
#[derive(Debug, Clone)]
pub struct QueryClient {
    client: Client,
    base_url: String,
}

impl QueryClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> QueryClientBuilder {
        QueryClientBuilder::default()
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of incidents, most recent first.
    ///
    /// `page` is 1-based. The offset/total relationship of the response is
    /// not verified; the page is returned as the server sent it.
    pub async fn fetch_incidents(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<Paginated<Incident>, ApiError> {
        let offset = page_offset(page, page_size);
        let url = format!("{}/query/incidents", self.base_url);
        debug!(page, page_size, offset, "fetching incidents");

        let response = self
            .client
            .get(&url)
            .query(&[("limit", page_size), ("offset", offset)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        decode(response).await
    }

    /// Fetch the AI analysis for an incident.
    ///
    /// Returns [`ApiError::NotFound`] when the server reports that no
    /// analysis has been generated yet, so callers can show that state
    /// instead of a generic error.
    pub async fn fetch_analysis(&self, incident_id: &str) -> Result<AnalysisResult, ApiError> {
        let url = format!("{}/query/incidents/{}/analysis", self.base_url, incident_id);
        debug!(incident_id, "fetching analysis");

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(incident_id.to_string()));
        }

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        decode(response).await
    }

    /// Fetch the `limit` most recent signals.
    pub async fn fetch_signals(&self, limit: u64) -> Result<Paginated<Signal>, ApiError> {
        let url = format!("{}/query/signals", self.base_url);
        debug!(limit, "fetching signals");

        let response = self.client.get(&url).query(&[("limit", limit)]).send().await?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        decode(response).await
    }

    /// Fetch the single most recent signal, if any exist.
    pub async fn latest_signal(&self) -> Result<Option<Signal>, ApiError> {
        let page = self.fetch_signals(1).await?;
        Ok(page.items.into_iter().next())
    }
}

/// Map a non-2xx status to the generic network error.
fn status_error(status: StatusCode) -> ApiError {
    ApiError::Network(format!("API returned status {}", status))
}

/// Decode a response body against the data model.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
}

/// Builder for [`QueryClient`].
#[derive(Debug, Default)]
pub struct QueryClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl QueryClientBuilder {
    /// Set the query API base URL (e.g., "http://localhost:8000").
    ///
    /// A trailing slash is stripped so endpoint paths can be appended.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the transport-level request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<QueryClient, ApiError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(QueryClient { client, base_url })
    }
}
