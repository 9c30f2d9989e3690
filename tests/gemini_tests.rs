//! HTTP-level tests for the Gemini backend against a local mock server

use std::time::Duration;

use etecnotes::ai::composer::build_request;
use etecnotes::ai::{
    AssistantClient, AssistantError, GeminiBackend, GenerativeBackend, RetryPolicy,
};
use mockito::Matcher;

fn backend_for(server: &mockito::ServerGuard) -> GeminiBackend {
    GeminiBackend::new(server.url(), "test-key".to_string()).expect("Failed to build backend")
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy::new(vec![Duration::from_millis(10); 3])
}

// Mocks match on path and query together, and every request carries ?key=.
fn key_query() -> Matcher {
    Matcher::UrlEncoded("key".into(), "test-key".into())
}

#[tokio::test]
async fn test_successful_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_query(key_query())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Olá! Como posso ajudar?"}]}}]}"#)
        .create_async()
        .await;

    let backend = backend_for(&server);
    let request = build_request(&[], "oi", None);
    let reply = backend.generate(&request).await.expect("reply");

    assert_eq!(reply, "Olá! Como posso ajudar?");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_body_uses_the_gemini_wire_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_query(key_query())
        .match_body(Matcher::PartialJson(serde_json::json!({
            "systemInstruction": {"role": "system"},
            "contents": [{"role": "user", "parts": [{"text": "oi"}]}],
            "generationConfig": {
                "temperature": 0.4,
                "maxOutputTokens": 1024,
                "topP": 0.95,
                "topK": 40
            }
        })))
        .with_status(200)
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"oi!"}]}}]}"#)
        .create_async()
        .await;

    let backend = backend_for(&server);
    let request = build_request(&[], "oi", None);
    backend.generate(&request).await.expect("reply");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_503_maps_to_server_overloaded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_query(key_query())
        .with_status(503)
        .with_body(
            r#"{"error":{"code":503,"message":"The model is overloaded. Please try again later."}}"#,
        )
        .create_async()
        .await;

    let backend = backend_for(&server);
    let request = build_request(&[], "oi", None);
    let err = backend.generate(&request).await.expect_err("503 fails");

    assert!(matches!(
        err,
        AssistantError::ServerOverloaded(message) if message.contains("overloaded")
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_429_maps_to_rate_limited() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_query(key_query())
        .with_status(429)
        .with_body(r#"{"error":{"code":429,"message":"Resource has been exhausted"}}"#)
        .create_async()
        .await;

    let backend = backend_for(&server);
    let request = build_request(&[], "oi", None);
    let err = backend.generate(&request).await.expect_err("429 fails");

    assert!(matches!(err, AssistantError::RateLimited(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_body_code_overrides_http_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_query(key_query())
        .with_status(400)
        .with_body(r#"{"error":{"code":503,"message":"overloaded behind a proxy"}}"#)
        .create_async()
        .await;

    let backend = backend_for(&server);
    let request = build_request(&[], "oi", None);
    let err = backend.generate(&request).await.expect_err("must fail");

    assert!(matches!(err, AssistantError::ServerOverloaded(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_error_body_falls_back_to_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_query(key_query())
        .with_status(500)
        .with_body("")
        .create_async()
        .await;

    let backend = backend_for(&server);
    let request = build_request(&[], "oi", None);
    let err = backend.generate(&request).await.expect_err("500 fails");

    assert!(matches!(
        err,
        AssistantError::Unknown { code: 500, message } if message == "Erro desconhecido"
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_success_without_candidates_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_query(key_query())
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let backend = backend_for(&server);
    let request = build_request(&[], "oi", None);
    let err = backend.generate(&request).await.expect_err("must fail");

    assert!(matches!(err, AssistantError::MalformedResponse));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_failure_is_a_network_error() {
    // Nothing listens on the discard port
    let backend =
        GeminiBackend::new("http://127.0.0.1:9".to_string(), "test-key".to_string())
            .expect("Failed to build backend");
    let request = build_request(&[], "oi", None);
    let err = backend.generate(&request).await.expect_err("must fail");

    assert!(matches!(err, AssistantError::NetworkError(_)));
}

#[tokio::test]
async fn test_client_retries_503_to_exhaustion() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_query(key_query())
        .with_status(503)
        .with_body(r#"{"error":{"code":503,"message":"The model is overloaded"}}"#)
        .expect(4)
        .create_async()
        .await;

    let client = AssistantClient::with_policy(backend_for(&server), fast_policy());
    let request = build_request(&[], "oi", None);
    let err = client
        .generate(&request, |_| {})
        .await
        .expect_err("exhausted retries fail");

    assert!(matches!(err, AssistantError::ServerOverloaded(_)));
    // 1 initial attempt + 3 retries
    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_does_not_retry_bad_requests() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_query(key_query())
        .with_status(400)
        .with_body(r#"{"error":{"code":400,"message":"Invalid argument"}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = AssistantClient::with_policy(backend_for(&server), fast_policy());
    let request = build_request(&[], "oi", None);
    let err = client
        .generate(&request, |_| {})
        .await
        .expect_err("bad request fails");

    assert!(matches!(err, AssistantError::Unknown { code: 400, .. }));
    mock.assert_async().await;
}
