//! Chat session: turns a streamed assistant reply into conversation state.
//!
//! The session is a small reducer ([`ChatSession::begin`],
//! [`ChatSession::push_chunk`], [`ChatSession::finish`],
//! [`ChatSession::fail`]) plus [`ChatSession::send`], which drives one turn
//! against a [`ChatBackend`].

use futures::StreamExt;
use kanban_core::{ChatBackend, ChatMessage, StreamError};
use thiserror::Error;

/// Shown when a stream failure carries no message of its own.
pub const GENERIC_CHAT_ERROR: &str = "Chat error";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatPhase {
    #[default]
    Idle,
    /// Request sent, no reply text yet.
    Sending,
    Streaming,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("A reply is still in progress")]
    Busy,

    #[error("{0}")]
    Stream(String),
}

#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    phase: ChatPhase,
    reply: String,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub const fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != ChatPhase::Idle
    }

    /// True while a turn is in flight and no reply text has arrived yet.
    pub fn awaiting_reply(&self) -> bool {
        self.is_busy() && self.messages.last().is_some_and(|m| !m.is_assistant())
    }

    /// Start a turn with the user's `text`.
    ///
    /// Returns the history to send, ending with the new user message.
    pub fn begin(&mut self, text: &str) -> Result<Vec<ChatMessage>, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if self.is_busy() {
            return Err(ChatError::Busy);
        }

        self.messages.push(ChatMessage::user(text));
        self.phase = ChatPhase::Sending;
        self.reply.clear();
        Ok(self.messages.clone())
    }

    /// Append one fragment of the reply.
    ///
    /// The first non-empty fragment of a turn adds an assistant message;
    /// later fragments extend it. Fragments outside a turn are dropped.
    pub fn push_chunk(&mut self, chunk: &str) {
        if !self.is_busy() {
            tracing::debug!(len = chunk.len(), "dropping chunk outside a turn");
            return;
        }
        self.phase = ChatPhase::Streaming;
        self.reply.push_str(chunk);

        match self.messages.last_mut() {
            Some(last) if last.is_assistant() => last.content.clone_from(&self.reply),
            _ if self.reply.is_empty() => {}
            _ => self.messages.push(ChatMessage::assistant(self.reply.clone())),
        }
    }

    pub fn finish(&mut self) {
        self.phase = ChatPhase::Idle;
    }

    /// End the turn after a failure. Reply text received so far is kept.
    pub fn fail(&mut self, error: &StreamError) -> ChatError {
        tracing::warn!(%error, "chat turn failed");
        self.phase = ChatPhase::Idle;
        ChatError::Stream(
            error
                .user_message()
                .unwrap_or_else(|| GENERIC_CHAT_ERROR.to_string()),
        )
    }

    /// Forget the conversation.
    pub fn clear(&mut self) -> Result<(), ChatError> {
        if self.is_busy() {
            return Err(ChatError::Busy);
        }
        self.messages.clear();
        self.reply.clear();
        Ok(())
    }

    /// Run one turn: send the history, apply each chunk as it arrives and
    /// call `on_update` with the chunk and the updated conversation.
    pub async fn send<B, F>(
        &mut self,
        backend: &B,
        text: &str,
        mut on_update: F,
    ) -> Result<(), ChatError>
    where
        B: ChatBackend + ?Sized,
        F: FnMut(&str, &[ChatMessage]),
    {
        let history = self.begin(text)?;

        let mut stream = match backend.stream_chat(&history).await {
            Ok(stream) => stream,
            Err(e) => return Err(self.fail(&e)),
        };

        while let Some(item) = stream.next().await {
            match item {
                Ok(chunk) => {
                    self.push_chunk(&chunk);
                    on_update(&chunk, &self.messages);
                }
                Err(e) => return Err(self.fail(&e)),
            }
        }

        self.finish();
        tracing::debug!(turns = self.messages.len(), "chat turn finished");
        Ok(())
    }
}
