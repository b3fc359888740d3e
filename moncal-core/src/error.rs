//! Error types for the moncal ecosystem.

use thiserror::Error;

/// Errors that can occur in moncal operations.
///
/// None of these is fatal to the process: every failure path hands control
/// back to the caller with a message fit for display.
#[derive(Error, Debug)]
pub enum MoncalError {
    /// Bad input, rejected before any network call. The user re-prompts.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A store operation failed. Prior client state is left intact and the
    /// mutation can be retried by the user.
    #[error("Store operation failed: {0}")]
    Persistence(String),

    /// An event timestamp that does not have the `YYYY-MM-DDTHH:MM:SS`
    /// shape. This is a data-integrity defect in upstream rows and is
    /// surfaced rather than masked.
    #[error("Malformed event timestamp: {0}")]
    MalformedTimestamp(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for moncal operations.
pub type MoncalResult<T> = Result<T, MoncalError>;
