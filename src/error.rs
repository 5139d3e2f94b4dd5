/// Unified error types for the Inspecto media client
use thiserror::Error;

/// Main error type for media resolution
#[derive(Error, Debug)]
pub enum MediaError {
    /// The outbound call to the media host did not complete successfully
    /// (network error, non-success response, invalid identifier)
    #[error("Resolution failed: {0}")]
    ResolutionFailed(String),

    /// Configuration validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal client errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for media operations
pub type MediaResult<T> = Result<T, MediaError>;
