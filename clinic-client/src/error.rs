//! Client error types

use shared::AppError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local storage error
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Domain error from shared rules or the backend envelope
    #[error(transparent)]
    App(#[from] AppError),
}

impl ClientError {
    /// Borrow the domain error, if this is one
    pub fn as_app(&self) -> Option<&AppError> {
        match self {
            ClientError::App(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
