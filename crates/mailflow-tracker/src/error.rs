//! Error types for operation tracking.

use thiserror::Error;

/// Errors that can occur when starting to track an operation.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// The acknowledgment names neither a campaign nor a research run,
    /// so notifications cannot be correlated with it
    #[error("acknowledgment with token '{token}' carries no subject id")]
    MissingSubject {
        /// Correlation token from the acknowledgment
        token: String,
    },
}

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
