use serde_json::json;
use travel_planner::error::Error;
use travel_planner::llm::{LlmClient, Provider};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(provider: Provider, model: &str, base_url: String) -> LlmClient {
    LlmClient::new(provider, "test-key".into(), model.into(), 256, Some(base_url)).unwrap()
}

#[tokio::test]
async fn gemini_request_shape_and_text_join() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
            "generationConfig": {"maxOutputTokens": 256}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Take the "}, {"text": "train."}]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Fully qualified model names are accepted too.
    let llm = client(Provider::Gemini, "models/gemini-1.5-flash", server.uri());
    let text = llm.complete("hello").await.unwrap();
    assert_eq!(text, "Take the train.");
}

#[tokio::test]
async fn gemini_without_candidates_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let llm = client(Provider::Gemini, "gemini-1.5-flash", server.uri());
    let err = llm.complete("hello").await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn anthropic_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "Fly."}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let llm = client(Provider::Anthropic, "claude-test", server.uri());
    assert_eq!(llm.complete("hello").await.unwrap(), "Fly.");
}

#[tokio::test]
async fn openai_compatible_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "llama3.1",
            "messages": [{"role": "user", "content": "hello"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Bus."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let llm = client(Provider::OpenAi, "llama3.1", server.uri());
    assert_eq!(llm.complete("hello").await.unwrap(), "Bus.");
}

#[tokio::test]
async fn server_error_is_reported_once_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let llm = client(Provider::Gemini, "gemini-1.5-flash", server.uri());
    match llm.complete("hello").await.unwrap_err() {
        Error::Api {
            message,
            status_code,
            ..
        } => {
            assert_eq!(status_code, Some(500));
            assert_eq!(message, "backend exploded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_carries_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "12"))
        .expect(1)
        .mount(&server)
        .await;

    let llm = client(Provider::Gemini, "gemini-1.5-flash", server.uri());
    match llm.complete("hello").await.unwrap_err() {
        Error::RateLimit {
            retry_after_secs, ..
        } => assert_eq!(retry_after_secs, Some(12)),
        other => panic!("expected RateLimit, got {other:?}"),
    }
}
