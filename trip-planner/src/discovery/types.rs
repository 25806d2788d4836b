//! Discovery service response envelopes.
//!
//! Every endpoint wraps its payload as
//! `{ "success": bool, "data": ..., "message": "..." }`.

use serde::{Deserialize, Serialize};

use crate::domain::{DestinationDetail, DestinationSummary};

use super::error::ClientError;

/// Response envelope shared by all endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// A successful envelope around `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// A failed envelope with an optional message.
    pub fn failure(message: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message,
        }
    }

    /// Unwrap the payload, classifying `success: false` and a missing payload.
    ///
    /// `fallback` is used when the service gives no message of its own.
    pub fn into_data(self, fallback: &'static str) -> Result<T, ClientError> {
        if !self.success {
            let message = self
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| fallback.to_string());
            return Err(ClientError::Application { message });
        }

        self.data.ok_or_else(|| ClientError::Malformed {
            fallback,
            reason: "successful response without data".to_string(),
        })
    }
}

/// Payload of the discovery endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryData {
    pub destinations: Vec<DestinationSummary>,
}

/// Envelope of the discovery endpoint.
pub type DiscoveryResponse = Envelope<DiscoveryData>;

/// Envelope of the detail endpoint.
pub type DetailResponse = Envelope<DestinationDetail>;
