//! Integration tests for the Gemini transport adapter.
//!
//! All tests run against a local wiremock server; no API keys or network
//! access required. They pin down the outcome classification contract the
//! orchestrator depends on.

use daypick_provider::{GeminiClient, GenerateClient, ProviderConfig, UpstreamOutcome};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-1.5-flash";

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(
        ProviderConfig::new("test-key")
            .with_base_url(server.uri())
            .with_timeout_seconds(5),
    )
    .unwrap()
}

#[tokio::test]
async fn success_returns_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{MODEL}:generateContent")))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "{\"word\":\"concise\"}" }
            ] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server).generate("prompt", MODEL).await;
    assert_eq!(
        outcome,
        UpstreamOutcome::Ok {
            text: "{\"word\":\"concise\"}".to_string()
        }
    );
}

#[tokio::test]
async fn status_429_classifies_as_quota() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let outcome = client_for(&server).generate("prompt", MODEL).await;
    assert_eq!(outcome, UpstreamOutcome::QuotaExceeded);
}

#[tokio::test]
async fn resource_exhausted_body_classifies_as_quota() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "status": "RESOURCE_EXHAUSTED", "message": "quota exceeded" }
        })))
        .mount(&server)
        .await;

    let outcome = client_for(&server).generate("prompt", MODEL).await;
    assert_eq!(outcome, UpstreamOutcome::QuotaExceeded);
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let outcome = client_for(&server).generate("prompt", MODEL).await;
    assert_eq!(
        outcome,
        UpstreamOutcome::HttpError {
            status: Some(500),
            body: "internal".to_string()
        }
    );
}

#[tokio::test]
async fn block_reason_classifies_as_blocked() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let outcome = client_for(&server).generate("prompt", MODEL).await;
    assert_eq!(
        outcome,
        UpstreamOutcome::Blocked {
            reason: "SAFETY".to_string()
        }
    );
}

#[tokio::test]
async fn success_without_text_classifies_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [] } }]
        })))
        .mount(&server)
        .await;

    let outcome = client_for(&server).generate("prompt", MODEL).await;
    assert_eq!(outcome, UpstreamOutcome::EmptyText);
}

#[tokio::test]
async fn transport_failure_normalizes_to_http_error_without_status() {
    // Bind-then-drop leaves a port nothing is listening on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GeminiClient::new(
        ProviderConfig::new("test-key")
            .with_base_url(format!("http://{addr}"))
            .with_timeout_seconds(2),
    )
    .unwrap();

    let outcome = client.generate("prompt", MODEL).await;
    match outcome {
        UpstreamOutcome::HttpError { status: None, body } => {
            assert!(!body.is_empty());
        }
        other => panic!("expected transport HttpError, got {other:?}"),
    }
}
