//! Remote client error types.

use kanban_core::{StoreError, StreamError};
use thiserror::Error;

/// Errors from the HTTP clients, before they are narrowed to the seam errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the body, or the raw body.
        message: String,
    },

    /// The server returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The server returned 402 Payment Required.
    #[error("payment required")]
    PaymentRequired,

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<RemoteError> for StoreError {
    fn from(error: RemoteError) -> Self {
        match error {
            RemoteError::Http(e) => Self::Unavailable(e.to_string()),
            RemoteError::Api { status, message } => Self::Rejected { status, message },
            RemoteError::RateLimited { retry_after_secs } => Self::Rejected {
                status: 429,
                message: format!("rate limited, retry after {retry_after_secs}s"),
            },
            RemoteError::PaymentRequired => Self::Rejected {
                status: 402,
                message: "payment required".into(),
            },
            RemoteError::Parse(message) => Self::Decode(message),
        }
    }
}

impl From<RemoteError> for StreamError {
    fn from(error: RemoteError) -> Self {
        match error {
            RemoteError::Http(e) => Self::Transport(e.to_string()),
            RemoteError::Api { status, message } => Self::Api { status, message },
            RemoteError::RateLimited { .. } => Self::RateLimited,
            RemoteError::PaymentRequired => Self::PaymentRequired,
            RemoteError::Parse(message) => Self::Protocol(message),
        }
    }
}
