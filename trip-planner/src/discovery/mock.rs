//! In-memory discovery service for development and testing.
//!
//! Serves destinations from a JSON fixture as if they came from the live
//! service, so the app can run without the backend.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{CanonicalQuery, DestinationDetail, DestinationId, DestinationSummary};

use super::client::DEFAULT_RESULT_LIMIT;
use super::error::ClientError;

/// Fixture file layout.
#[derive(Debug, Deserialize)]
struct Fixture {
    destinations: Vec<DestinationSummary>,
    #[serde(default)]
    details: HashMap<String, DestinationDetail>,
}

/// Discovery service stand-in that serves fixed data.
///
/// Every query gets the same list; details are looked up by id.
#[derive(Debug, Clone)]
pub struct StaticDestinations {
    summaries: Arc<Vec<DestinationSummary>>,
    details: Arc<HashMap<DestinationId, DestinationDetail>>,
}

impl StaticDestinations {
    /// Serve the given records.
    pub fn new(
        summaries: Vec<DestinationSummary>,
        details: impl IntoIterator<Item = (DestinationId, DestinationDetail)>,
    ) -> Self {
        Self {
            summaries: Arc::new(summaries),
            details: Arc::new(details.into_iter().collect()),
        }
    }

    /// Load a fixture file of the form
    /// `{ "destinations": [...], "details": { "<id>": {...} } }`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| ClientError::Malformed {
            fallback: "Failed to read mock data",
            reason: format!("{}: {}", path.display(), e),
        })?;

        let fixture: Fixture = serde_json::from_str(&json).map_err(|e| ClientError::Malformed {
            fallback: "Failed to parse mock data",
            reason: format!("{}: {}", path.display(), e),
        })?;

        Ok(Self::new(
            fixture.destinations,
            fixture
                .details
                .into_iter()
                .map(|(id, detail)| (DestinationId::new(id), detail)),
        ))
    }

    /// Number of destinations in the full list.
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// The list, cut to the same size the live client keeps.
    pub async fn fetch_summaries(
        &self,
        _query: &CanonicalQuery,
    ) -> Result<Vec<DestinationSummary>, ClientError> {
        Ok(self
            .summaries
            .iter()
            .take(DEFAULT_RESULT_LIMIT)
            .cloned()
            .collect())
    }

    /// The stored detail record; unknown ids answer like a 404.
    pub async fn fetch_detail(&self, id: &DestinationId) -> Result<DestinationDetail, ClientError> {
        self.details
            .get(id)
            .cloned()
            .ok_or(ClientError::Status { status: 404 })
    }
}
