//! AI providers and chat session against mock endpoints.

use hulara_client::ai::{AiError, ChatMessage, ChatProvider, ChatSession, GeminiClient, OpenAiClient};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn openai(server: &MockServer) -> OpenAiClient {
    OpenAiClient::with_base_url(SecretString::from("sk-test"), server.uri()).expect("client")
}

fn gemini(server: &MockServer) -> GeminiClient {
    GeminiClient::with_base_url(SecretString::from("gm-test"), server.uri()).expect("client")
}

#[tokio::test]
async fn test_openai_completion_extracts_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "gpt-3.5-turbo"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Here is a tagline."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = openai(&server)
        .complete(&[ChatMessage::user("Write a tagline")])
        .await
        .expect("completion");

    assert_eq!(reply, "Here is a tagline.");
}

#[tokio::test]
async fn test_openai_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429).set_body_string("{\"error\":{\"code\":\"rate_limited\"}}"),
        )
        .mount(&server)
        .await;

    let result = openai(&server).complete(&[ChatMessage::user("hi")]).await;

    match result {
        Err(AiError::Api { status, body }) => {
            assert_eq!(status, 429);
            assert!(body.contains("rate_limited"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_openai_empty_choices_is_missing_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let result = openai(&server).complete(&[ChatMessage::user("hi")]).await;
    assert!(matches!(result, Err(AiError::MissingContent)));
}

#[tokio::test]
async fn test_gemini_completion_extracts_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash-latest:generateContent"))
        .and(query_param("key", "gm-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "Hello!"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = gemini(&server)
        .complete(&[ChatMessage::user("hi")])
        .await
        .expect("completion");

    assert_eq!(reply, "Hello!");
}

#[tokio::test]
async fn test_gemini_falls_back_to_pro_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash-latest:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "Fallback reply"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = gemini(&server)
        .complete(&[ChatMessage::user("hi")])
        .await
        .expect("completion");

    assert_eq!(reply, "Fallback reply");
}

#[tokio::test]
async fn test_gemini_fallback_failure_reports_second_error() {
    let server = MockServer::start().await;

    for model in ["gemini-1.5-flash-latest", "gemini-pro"] {
        Mock::given(method("POST"))
            .and(path(format!("/v1beta/models/{model}:generateContent")))
            .respond_with(ResponseTemplate::new(403).set_body_string("key not authorized"))
            .expect(1)
            .mount(&server)
            .await;
    }

    let result = gemini(&server).complete(&[ChatMessage::user("hi")]).await;

    match result {
        Err(AiError::Api { status, body }) => {
            assert_eq!(status, 403);
            assert!(body.contains("key not authorized"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_chat_session_keeps_history_across_turns() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Reply"}}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let mut session = ChatSession::new(ChatProvider::OpenAi(openai(&server)));
    session.send("first").await;
    session.send("second").await;

    // Two user turns and two assistant turns, oldest first.
    assert_eq!(session.history().len(), 4);
    assert_eq!(session.history()[0].content, "first");
    assert_eq!(session.history()[3].content, "Reply");
}

#[tokio::test]
async fn test_chat_session_context_stays_out_of_history() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Reply"}}]
        })))
        .mount(&server)
        .await;

    let mut session = ChatSession::new(ChatProvider::OpenAi(openai(&server)));
    session.set_context(Some("The conversation is about product 42.".to_string()));
    session.send("hi").await;

    // The context rides along with each completion but is not a turn.
    assert_eq!(session.history().len(), 2);
    assert!(session
        .history()
        .iter()
        .all(|m| m.role != hulara_core::ChatRole::System));
}

#[tokio::test]
async fn test_chat_session_renders_failure_as_reply_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let mut session = ChatSession::new(ChatProvider::OpenAi(openai(&server)));
    let reply = session.send("hi").await;

    assert!(reply.starts_with("Error:"), "got: {reply}");
    assert!(reply.contains("overloaded"));
    // The conversation continues; the failed turn is part of the history.
    assert_eq!(session.history().len(), 2);
}
