//! `SseChatClient` against a scripted streaming endpoint.

mod common;

use std::time::Duration;

use common::{MockServer, Reply};
use futures::StreamExt;
use kanban_core::{ChatBackend, ChatMessage, StreamError};
use kanban_remote::SseChatClient;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn delta(content: &str) -> String {
    format!(
        "data: {}\n\n",
        json!({ "choices": [{ "delta": { "content": content } }] })
    )
}

fn client_for(server: &MockServer) -> SseChatClient {
    SseChatClient::new(format!("{}/chat", server.base_url), Duration::from_secs(5))
        .unwrap()
        .with_api_key("secret")
        .with_model("test-model")
}

#[tokio::test]
async fn streams_chunks_in_order() {
    let body = format!(
        ": open\n\n{}{}{}data: [DONE]\n\n",
        delta("Start "),
        delta("with the "),
        delta("high priority task.")
    );
    let server = MockServer::start(vec![Reply::event_stream(body)]);
    let client = client_for(&server);

    let history = vec![ChatMessage::user("What next?")];
    let stream = client.stream_chat(&history).await.unwrap();
    let chunks: Vec<String> = stream.map(Result::unwrap).collect().await;
    let requests = server.finish();

    assert_eq!(chunks, vec!["Start ", "with the ", "high priority task."]);

    let req = &requests[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.url, "/chat");
    assert_eq!(req.header("authorization"), Some("Bearer secret"));
    assert_eq!(
        req.json(),
        json!({
            "messages": [{ "role": "user", "content": "What next?" }],
            "model": "test-model"
        })
    );
}

#[tokio::test]
async fn body_without_done_ends_at_eof() {
    let server = MockServer::start(vec![Reply::event_stream(delta("only"))]);
    let client = client_for(&server);

    let stream = client.stream_chat(&[ChatMessage::user("hi")]).await.unwrap();
    let chunks: Vec<String> = stream.map(Result::unwrap).collect().await;
    server.finish();

    assert_eq!(chunks, vec!["only"]);
}

#[tokio::test]
async fn in_stream_error_ends_stream() {
    let body = format!(
        "{}data: {}\n\n{}",
        delta("partial"),
        json!({ "error": { "message": "upstream overloaded" } }),
        delta("never")
    );
    let server = MockServer::start(vec![Reply::event_stream(body)]);
    let client = client_for(&server);

    let stream = client.stream_chat(&[ChatMessage::user("hi")]).await.unwrap();
    let items: Vec<Result<String, StreamError>> = stream.collect().await;
    server.finish();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_deref().ok(), Some("partial"));
    assert!(matches!(&items[1], Err(StreamError::Remote(m)) if m == "upstream overloaded"));
}

#[rstest]
#[case(429, json!({ "error": "Rate limits exceeded" }), "rate")]
#[case(402, json!({ "error": "Payment required" }), "payment")]
#[case(500, json!({ "error": "AI gateway error" }), "api")]
#[tokio::test]
async fn refused_requests_map_to_stream_errors(
    #[case] status: u16,
    #[case] body: serde_json::Value,
    #[case] kind: &str,
) {
    let server = MockServer::start(vec![Reply::json(status, body)]);
    let client = client_for(&server);

    let result = client.stream_chat(&[ChatMessage::user("hi")]).await;
    server.finish();

    let Err(err) = result else {
        panic!("expected an error for status {status}");
    };
    match kind {
        "rate" => assert!(matches!(err, StreamError::RateLimited)),
        "payment" => assert!(matches!(err, StreamError::PaymentRequired)),
        _ => assert!(
            matches!(&err, StreamError::Api { status: 500, message } if message == "AI gateway error"),
            "got: {err:?}"
        ),
    }
}

#[tokio::test]
async fn omits_model_and_auth_when_unset() {
    let server = MockServer::start(vec![Reply::event_stream("data: [DONE]\n\n")]);
    let client =
        SseChatClient::new(format!("{}/chat", server.base_url), Duration::from_secs(5)).unwrap();

    let stream = client.stream_chat(&[ChatMessage::user("hi")]).await.unwrap();
    let chunks: Vec<_> = stream.collect().await;
    let requests = server.finish();

    assert!(chunks.is_empty());
    assert_eq!(requests[0].header("authorization"), None);
    assert_eq!(
        requests[0].json(),
        json!({ "messages": [{ "role": "user", "content": "hi" }] })
    );
}
