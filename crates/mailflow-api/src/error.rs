//! Error types for the platform API bindings.

use thiserror::Error;

/// Errors that can occur while talking to the platform API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication failed (missing or rejected token)
    #[error("authentication failed: {message}")]
    Unauthorized {
        /// Error message from the server
        message: String,
    },

    /// Non-success HTTP status from the API
    #[error("API error ({endpoint}): status {status}, {message}")]
    Status {
        /// Endpoint path that was called
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Error message from the server
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("failed to parse response from {endpoint}: {message}")]
    Parse {
        /// Endpoint path that was called
        endpoint: String,
        /// Parse error details
        message: String,
    },

    /// Request validation error, caught before anything is sent
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
