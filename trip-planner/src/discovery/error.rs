//! Discovery client error types.

/// Message shown when a list request fails without saying why.
pub const LIST_FALLBACK_MESSAGE: &str = "Failed to fetch destinations";

/// Message shown when a detail request fails without saying why.
pub const DETAIL_FALLBACK_MESSAGE: &str = "Failed to fetch destination details";

/// Errors from the discovery service.
///
/// `Status` and `Network` are transport failures; `Application` is the
/// service declining the request; `Malformed` is a body we could not read,
/// and reads to the user the same way as an application error.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Non-success HTTP status
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// Connection failure, timeout, or similar
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with `success: false`
    #[error("{message}")]
    Application { message: String },

    /// The configured base URL cannot have paths appended
    #[error("invalid discovery base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The fetch ended without an answer, e.g. the source panicked
    #[error("{fallback}")]
    Interrupted {
        fallback: &'static str,
        reason: String,
    },

    /// The response body was not a readable envelope
    #[error("{fallback}")]
    Malformed {
        fallback: &'static str,
        reason: String,
    },
}

/// Error type of the list request.
pub type DiscoveryError = ClientError;

/// Error type of the detail request.
pub type DetailError = ClientError;

impl ClientError {
    /// Whether the failure happened below the application envelope.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Status { .. } | ClientError::Network(_))
    }

    /// The HTTP status, when the service answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
