//! # kanban-remote
//!
//! HTTP clients for the kanban board:
//! - [`RestTaskStore`]: a [`kanban_core::TaskStore`] over a PostgREST `tasks`
//!   resource
//! - [`SseChatClient`]: a [`kanban_core::ChatBackend`] that streams an
//!   assistant reply as server-sent events

mod error;
mod http;
pub mod postgrest;
pub mod sse;

pub use error::RemoteError;
pub use http::error_message;
pub use postgrest::RestTaskStore;
pub use sse::{SseChatClient, SseDecoder, chunk_stream};
