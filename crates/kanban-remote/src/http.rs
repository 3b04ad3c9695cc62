//! Shared HTTP helpers for the remote clients.
//!
//! Centralizes client construction and status-code checks (429 rate limiting
//! with `Retry-After` parsing, 402, non-success → [`RemoteError::Api`]) so the
//! store and chat clients stay focused on request construction and response
//! mapping.

use std::time::Duration;

use crate::error::RemoteError;

const USER_AGENT: &str = concat!("kanban/", env!("CARGO_PKG_VERSION"));

/// Build a client with a total request timeout (store calls).
pub fn client_with_timeout(timeout: Duration) -> Result<reqwest::Client, RemoteError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// Build a client that only bounds connection setup (streaming calls).
pub fn client_with_connect_timeout(timeout: Duration) -> Result<reqwest::Client, RemoteError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(timeout)
        .build()?)
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`RemoteError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **402 Payment Required** → [`RemoteError::PaymentRequired`].
/// - **Non-success status** → [`RemoteError::Api`] with the status code and
///   the error message found in the body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(RemoteError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if resp.status() == 402 {
        return Err(RemoteError::PaymentRequired);
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(RemoteError::Api {
            status,
            message: error_message(&body),
        });
    }
    Ok(resp)
}

/// Pull a human-readable message out of an error body.
///
/// Understands PostgREST (`{"message": ...}`) and gateway
/// (`{"error": "..."}` or `{"error": {"message": ...}}`) shapes. Anything
/// else is returned trimmed.
pub fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    let found = match value.get("error") {
        Some(serde_json::Value::String(s)) => Some(s.as_str()),
        Some(obj) => obj.get("message").and_then(|m| m.as_str()),
        None => None,
    }
    .or_else(|| value.get("message").and_then(|m| m.as_str()));

    found.map_or_else(|| body.trim().to_string(), str::to_string)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
