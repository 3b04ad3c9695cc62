//! Cross-cutting error types for the board.
//!
//! `StoreError` and `StreamError` are the only failures the board controller
//! and chat consumer see. `CoreError` rejects user input up front. Backend crates keep their own error enums
//! (`DatabaseError`, `RemoteError`) and convert into these at the trait
//! boundary. A unified error is deferred to `kanban-cli`, where `anyhow`
//! collects everything.

use thiserror::Error;

/// Input rejected before it reaches a store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// A task store operation failed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached (network, file, connection).
    #[error("Task store unavailable: {0}")]
    Unavailable(String),

    /// The store answered but refused the operation.
    #[error("Task store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The store refused a write that violates a constraint.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// No task with this id exists.
    #[error("Task not found: {id}")]
    NotFound { id: String },

    /// The store returned data that does not match the task shape.
    #[error("Could not decode task store response: {0}")]
    Decode(String),
}

/// The chat call failed or was interrupted mid-stream.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Could not connect, or the connection dropped while streaming.
    #[error("Chat transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("Chat endpoint error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limit exceeded, please try again later.")]
    RateLimited,

    #[error("Payment required, please add credits.")]
    PaymentRequired,

    /// The response body was not a valid event stream.
    #[error("Malformed chat stream: {0}")]
    Protocol(String),

    /// The assistant reported an error inside the stream.
    #[error("{0}")]
    Remote(String),
}

impl StreamError {
    /// Message suitable for showing to the user, when the failure carries one.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Api { message, .. } | Self::Remote(message) if !message.trim().is_empty() => {
                Some(message.clone())
            }
            Self::Api { .. } | Self::Remote(_) => None,
            other => Some(other.to_string()),
        }
    }
}
