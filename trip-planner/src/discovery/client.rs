//! Discovery service HTTP client.
//!
//! Two calls: the destination list for a query, and the full record for one
//! destination. Neither is cached or retried.

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{CanonicalQuery, DestinationDetail, DestinationId, DestinationSummary};

use super::error::{ClientError, DETAIL_FALLBACK_MESSAGE, LIST_FALLBACK_MESSAGE};
use super::types::{DetailResponse, DiscoveryResponse, Envelope};

/// Default base URL for the discovery service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default number of destinations kept from a list response.
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Configuration for the discovery client.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Base URL of the service, without trailing slash
    pub base_url: String,
    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// How many destinations of a list response to keep
    pub result_limit: usize,
}

impl DiscoveryConfig {
    /// Create a new config for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }

    /// Bound every request by `timeout`, or lift the bound with `None`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Keep at most `n` destinations from each list response.
    pub fn with_result_limit(mut self, n: usize) -> Self {
        self.result_limit = n;
        self
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Discovery service client.
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    http: reqwest::Client,
    base_url: Url,
    result_limit: usize,
}

impl DiscoveryClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DiscoveryConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: config.base_url,
                reason: "not a hierarchical URL".to_string(),
            });
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
            result_limit: config.result_limit,
        })
    }

    /// The service base URL.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// The base URL with `segments` appended, each percent-encoded as one segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Always Ok: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Fetch the top destinations matching `query`, in the service's order.
    pub async fn fetch_summaries(
        &self,
        query: &CanonicalQuery,
    ) -> Result<Vec<DestinationSummary>, ClientError> {
        let url = self.endpoint(&["api", "v2", "discovery"]);
        let pairs = query.to_query_pairs();

        let response: DiscoveryResponse = self.get_envelope(&url, &pairs, LIST_FALLBACK_MESSAGE).await?;
        let mut destinations = response.into_data(LIST_FALLBACK_MESSAGE)?.destinations;

        if destinations.len() > self.result_limit {
            debug!(
                returned = destinations.len(),
                kept = self.result_limit,
                "truncating destination list"
            );
            destinations.truncate(self.result_limit);
        }

        Ok(destinations)
    }

    /// Fetch the full record for one destination.
    pub async fn fetch_detail(&self, id: &DestinationId) -> Result<DestinationDetail, ClientError> {
        let id = id.as_str();
        if matches!(id, "" | "." | "..") {
            return Err(ClientError::Malformed {
                fallback: DETAIL_FALLBACK_MESSAGE,
                reason: format!("destination id {id:?} is not a path segment"),
            });
        }
        let url = self.endpoint(&["api", "v2", "details", id]);

        let response: DetailResponse = self.get_envelope(&url, &[], DETAIL_FALLBACK_MESSAGE).await?;
        response.into_data(DETAIL_FALLBACK_MESSAGE)
    }

    async fn get_envelope<T: DeserializeOwned>(
        &self,
        url: &Url,
        query: &[(&str, String)],
        fallback: &'static str,
    ) -> Result<Envelope<T>, ClientError> {
        debug!(%url, "requesting");

        let response = self.http.get(url.clone()).query(query).send().await.map_err(|e| {
            warn!(%url, error = %e, "request failed");
            ClientError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "non-success status");
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            warn!(%url, error = %e, "unreadable response body");
            ClientError::Malformed {
                fallback,
                reason: e.to_string(),
            }
        })
    }
}
