//! Error types for the Fabric API client.

use crate::redact::sanitize_reqwest_error;
use thiserror::Error;

/// Main error type for Fabric backend calls.
#[derive(Debug, Error)]
pub enum FabricApiError {
    /// Configuration errors (invalid base URL, bad settings)
    #[error("config error: {0}")]
    Config(String),

    /// HTTP errors (non-2xx responses from the backend)
    #[error("http error: {0}")]
    Http(String),

    /// Transport errors (connect, DNS, timeout, TLS)
    #[error("http transport error: {0}")]
    Transport(String),

    /// The backend answered 2xx but the payload is not the expected shape
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

/// Result type alias for Fabric API operations.
pub type Result<T> = std::result::Result<T, FabricApiError>;

impl From<reqwest::Error> for FabricApiError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(sanitize_reqwest_error(&value))
    }
}
