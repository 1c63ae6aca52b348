//! Error types for the device sync crate.

use thiserror::Error;

/// Result type alias for device sync operations.
pub type Result<T> = std::result::Result<T, DeviceSyncError>;

/// Errors that can occur while talking to the sync service.
#[derive(Debug, Error)]
pub enum DeviceSyncError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API error response from the sync service
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication error (missing or invalid token)
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl DeviceSyncError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }
}

/// Every upstream failure is a soft fetch failure from the core's point of
/// view: the local value stays authoritative.
impl From<DeviceSyncError> for perpdesk_core::errors::Error {
    fn from(err: DeviceSyncError) -> Self {
        perpdesk_core::errors::Error::FetchFailed(err.to_string())
    }
}
