//! The chat backend seam.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::entities::ChatMessage;
use crate::errors::StreamError;

/// Incremental text fragments of one assistant reply, in arrival order.
///
/// The stream ends after the last fragment; an `Err` item aborts the reply.
pub type ChunkStream = BoxStream<'static, Result<String, StreamError>>;

/// A remote assistant that answers a conversation with streamed text.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send the full history and start receiving the reply.
    ///
    /// Fails before any chunk when the request itself is refused.
    async fn stream_chat(&self, messages: &[ChatMessage]) -> Result<ChunkStream, StreamError>;
}
