//! Error types for the backend client.

use reel_session::LoadError;
use thiserror::Error;

/// Errors that can occur when talking to the Reel Player backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Backend envelope reported a failure
    #[error("backend reported failure: {0}")]
    Backend(String),

    /// Invalid base URL
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a response body
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Server is offline or unreachable
    #[error("server unreachable: {0}")]
    Unreachable(String),

    /// Request was superseded before completion
    #[error("request cancelled")]
    Cancelled,
}

impl From<ClientError> for LoadError {
    fn from(error: ClientError) -> Self {
        LoadError::new(error.to_string())
    }
}

/// Result type for backend client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
