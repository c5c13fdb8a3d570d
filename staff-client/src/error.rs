//! Client error types

use shared::ErrorBody;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection refused, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Base URL cannot carry path segments
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server-side failure (5xx)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Map a non-2xx response to an error, preferring the server's
    /// `{"error": ...}` message over the raw body
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body.to_string()
                }
            });

        match status {
            reqwest::StatusCode::NOT_FOUND => ClientError::NotFound(message),
            s if s.is_client_error() => ClientError::Validation(message),
            _ => ClientError::Internal(message),
        }
    }

    /// Server-supplied message, without the variant prefix
    pub fn message(&self) -> String {
        match self {
            ClientError::NotFound(m)
            | ClientError::Validation(m)
            | ClientError::Internal(m)
            | ClientError::InvalidResponse(m)
            | ClientError::InvalidUrl(m) => m.clone(),
            ClientError::Http(e) => e.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
