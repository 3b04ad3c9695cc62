//! Chat endpoint configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    /// Streaming chat endpoint (OpenAI-compatible server-sent events).
    #[serde(default)]
    pub url: String,

    /// Bearer token for the endpoint. Empty means no `Authorization` header.
    #[serde(default)]
    pub api_key: String,

    /// Model name forwarded in the request body. Empty means server default.
    #[serde(default)]
    pub model: String,
}

impl ChatConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }
}
