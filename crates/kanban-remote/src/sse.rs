//! Streaming chat over server-sent events.
//!
//! The endpoint speaks the OpenAI-compatible chat-completions stream format:
//! `data: {json}` lines carrying `choices[0].delta.content`, terminated by
//! `data: [DONE]`.

use std::collections::VecDeque;
use std::fmt::Display;
use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use kanban_core::{ChatBackend, ChatMessage, ChunkStream, StreamError};
use serde::Serialize;

use crate::error::RemoteError;
use crate::http::{check_response, client_with_connect_timeout};

/// Incremental decoder for an SSE body.
///
/// Bytes are buffered until a full line is available, so multi-byte UTF-8
/// sequences and JSON payloads may be split across network chunks. A complete
/// `data:` line that is not valid JSON is skipped.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    done: bool,
}

impl SseDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `data: [DONE]` has been seen.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Feed raw bytes and collect every item that is now complete.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Result<String, StreamError>> {
        if self.done {
            return Vec::new();
        }
        self.buffer.extend_from_slice(bytes);
        self.drain()
    }

    /// Flush what is left after the body ended.
    ///
    /// A trailing line without a newline is processed like any other.
    pub fn finish(&mut self) -> Vec<Result<String, StreamError>> {
        if self.done || self.buffer.is_empty() {
            return Vec::new();
        }
        if self.buffer.last() != Some(&b'\n') {
            self.buffer.push(b'\n');
        }
        self.drain()
    }

    fn drain(&mut self) -> Vec<Result<String, StreamError>> {
        let mut items = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=newline).collect();
            let text = String::from_utf8_lossy(&raw[..raw.len() - 1]).into_owned();
            let line = text.strip_suffix('\r').unwrap_or(&text);

            if line.starts_with(':') || line.trim().is_empty() {
                continue;
            }
            let Some(payload) = line.strip_prefix("data: ") else {
                continue;
            };
            let payload = payload.trim();
            if payload == "[DONE]" {
                self.done = true;
                self.buffer.clear();
                break;
            }

            match serde_json::from_str::<serde_json::Value>(payload) {
                Ok(event) => {
                    if let Some(error) = event.get("error") {
                        let message = error
                            .get("message")
                            .and_then(|m| m.as_str())
                            .or_else(|| error.as_str())
                            .unwrap_or("")
                            .to_string();
                        items.push(Err(StreamError::Remote(message)));
                        continue;
                    }
                    if let Some(content) = event
                        .pointer("/choices/0/delta/content")
                        .and_then(|c| c.as_str())
                        .filter(|c| !c.is_empty())
                    {
                        items.push(Ok(content.to_string()));
                    }
                }
                Err(error) => {
                    tracing::debug!(payload, %error, "dropping unparseable event");
                }
            }
        }
        items
    }
}

/// Turn a body byte stream into a stream of text chunks.
///
/// The stream stops after `[DONE]`, after the body ends, or after the first
/// error item.
pub fn chunk_stream<B, T, E>(body: B) -> ChunkStream
where
    B: Stream<Item = Result<T, E>> + Send + Unpin + 'static,
    T: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    struct State<B> {
        body: B,
        decoder: SseDecoder,
        pending: VecDeque<Result<String, StreamError>>,
        finished: bool,
    }

    let state = State {
        body,
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    futures::stream::unfold(state, |mut st| async move {
        loop {
            if let Some(item) = st.pending.pop_front() {
                if item.is_err() {
                    st.finished = true;
                    st.pending.clear();
                }
                return Some((item, st));
            }
            if st.finished || st.decoder.is_done() {
                return None;
            }
            match st.body.next().await {
                Some(Ok(bytes)) => {
                    let items = st.decoder.feed(bytes.as_ref());
                    st.pending.extend(items);
                }
                Some(Err(e)) => {
                    st.finished = true;
                    return Some((Err(StreamError::Transport(e.to_string())), st));
                }
                None => {
                    let items = st.decoder.finish();
                    st.pending.extend(items);
                    st.finished = true;
                }
            }
        }
    })
    .boxed()
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

/// [`ChatBackend`] that POSTs the conversation and reads an SSE reply.
pub struct SseChatClient {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl SseChatClient {
    /// Create a client for the chat endpoint at `url`.
    ///
    /// Only connection setup is bounded by `connect_timeout`; a reply may
    /// stream for as long as the server keeps sending.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, connect_timeout: Duration) -> Result<Self, RemoteError> {
        Ok(Self {
            http: client_with_connect_timeout(connect_timeout)?,
            url: url.into(),
            api_key: None,
            model: None,
        })
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = (!key.is_empty()).then_some(key);
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.model = (!model.is_empty()).then_some(model);
        self
    }
}

#[async_trait]
impl ChatBackend for SseChatClient {
    async fn stream_chat(&self, messages: &[ChatMessage]) -> Result<ChunkStream, StreamError> {
        let body = ChatRequest {
            messages,
            model: self.model.as_deref(),
        };
        let mut request = self.http.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(url = %self.url, turns = messages.len(), "starting chat stream");
        let resp = request.send().await.map_err(RemoteError::from)?;
        let resp = check_response(resp).await.inspect_err(|e| {
            tracing::warn!(error = %e, "chat endpoint refused request");
        })?;

        Ok(chunk_stream(Box::pin(resp.bytes_stream())))
    }
}
