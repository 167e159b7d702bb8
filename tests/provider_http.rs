//! HTTP-level tests for the Gemini provider client and remote token verifier
//!
//! Uses wiremock to stand in for the upstream API so error classification is
//! tested against real HTTP behavior rather than hand-built errors.

use courseforge::auth::{RemoteTokenVerifier, TokenVerifier, UserId};
use courseforge::provider::{GeminiClient, ProviderError, TextGenerator};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(server.uri(), "test-key", Duration::from_secs(5))
}

#[tokio::test]
async fn test_successful_generation_returns_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/model-a:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "the prompt" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "{\"courseTitle\":\"X\"}" } ] } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server)
        .generate("model-a", "the prompt")
        .await
        .expect("should succeed");
    assert_eq!(text, "{\"courseTitle\":\"X\"}");
}

#[tokio::test]
async fn test_http_429_is_classified_as_quota() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate("model-a", "p")
        .await
        .expect_err("should fail");
    assert!(matches!(err, ProviderError::Quota(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_quota_wording_in_error_body_is_classified_as_quota() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("RESOURCE_EXHAUSTED: quota exceeded for this model"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate("model-a", "p")
        .await
        .expect_err("should fail");
    assert!(matches!(err, ProviderError::Quota(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_connection_refused_is_classified_as_unavailable() {
    // Nothing listens on port 1.
    let client = GeminiClient::new("http://127.0.0.1:1", "test-key", Duration::from_secs(5));
    let err = client
        .generate("model-a", "p")
        .await
        .expect_err("should fail");
    assert!(matches!(err, ProviderError::Unavailable(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_slow_upstream_is_classified_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"candidates": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = GeminiClient::new(server.uri(), "test-key", Duration::from_millis(200));
    let err = client
        .generate("model-a", "p")
        .await
        .expect_err("should fail");
    assert!(matches!(err, ProviderError::Timeout { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_malformed_success_body_is_other() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate("model-a", "p")
        .await
        .expect_err("should fail");
    assert!(matches!(err, ProviderError::Other(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_success_with_no_candidates_yields_empty_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let text = client_for(&server)
        .generate("model-a", "p")
        .await
        .expect("empty candidates is not a transport error");
    assert!(text.is_empty());
}

#[tokio::test]
async fn test_remote_verifier_accepts_known_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/verify"))
        .and(body_partial_json(json!({"idToken": "good-token"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{ "localId": "user-42" }]
        })))
        .mount(&server)
        .await;

    let verifier = RemoteTokenVerifier::new(format!("{}/verify", server.uri()));
    let user = verifier
        .authenticate(Some("good-token"))
        .await
        .expect("should authenticate");
    assert_eq!(user, UserId::new("user-42"));
}

#[tokio::test]
async fn test_remote_verifier_rejects_on_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("INVALID_ID_TOKEN"))
        .mount(&server)
        .await;

    let verifier = RemoteTokenVerifier::new(format!("{}/verify", server.uri()));
    let err = verifier
        .authenticate(Some("bad-token"))
        .await
        .expect_err("should reject");
    assert!(matches!(err, courseforge::error::AppError::Auth(_)));
}

#[tokio::test]
async fn test_remote_verifier_rejects_empty_user_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": []})))
        .mount(&server)
        .await;

    let verifier = RemoteTokenVerifier::new(format!("{}/verify", server.uri()));
    let err = verifier
        .authenticate(Some("token"))
        .await
        .expect_err("should reject");
    assert!(matches!(err, courseforge::error::AppError::Auth(_)));
}
