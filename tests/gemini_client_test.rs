//! Integration tests for the Gemini client against a mock server.

mod common;

use commitai::ai::{CommitPlan, GeminiClient};
use commitai::core::config::Config;
use commitai::core::diff::{FileChange, FileStatus};
use commitai::{AiError, CommitaiError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/test-model:generateContent";

fn config_for(server: &MockServer) -> Config {
    Config {
        api_key: Some("test-key".to_string()),
        endpoint: server.uri(),
        model: "test-model".to_string(),
        max_tokens: 256,
        ..Config::default()
    }
}

async fn mock_reply(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_generate_returns_first_part_verbatim() {
    let server = MockServer::start().await;
    mock_reply(&server, 200, common::gemini_reply("  feat: add thing\n")).await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    let text = client.generate("prompt").await.unwrap();

    assert_eq!(text, "  feat: add thing\n");
}

#[tokio::test]
async fn test_request_carries_prompt_and_generation_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "hello gemini" }] }],
            "generationConfig": { "maxOutputTokens": 256 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::gemini_reply("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    assert_eq!(client.generate("hello gemini").await.unwrap(), "ok");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .url
        .query_pairs()
        .any(|(k, v)| k == "key" && !v.is_empty()));
}

#[tokio::test]
async fn test_backend_error_envelope() {
    let server = MockServer::start().await;
    mock_reply(
        &server,
        429,
        json!({ "error": { "code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED" } }),
    )
    .await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    let err = client.generate("prompt").await.unwrap_err();

    match err {
        CommitaiError::Ai(AiError::Backend { message }) => assert_eq!(message, "quota exceeded"),
        other => panic!("expected backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_body_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    let err = client.generate("prompt").await.unwrap_err();

    match err {
        CommitaiError::Ai(AiError::Protocol { body, .. }) => {
            assert_eq!(body, "<html>Bad Gateway</html>")
        }
        other => panic!("expected protocol error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_candidates() {
    let server = MockServer::start().await;
    mock_reply(&server, 200, json!({ "candidates": [] })).await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    let err = client.generate("prompt").await.unwrap_err();

    assert!(matches!(err, CommitaiError::Ai(AiError::EmptyResponse)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let config = Config {
        api_key: Some("test-key".to_string()),
        endpoint: "http://127.0.0.1:1".to_string(),
        ..Config::default()
    };

    let client = GeminiClient::new(&config).unwrap();
    let err = client.generate("prompt").await.unwrap_err();

    assert!(matches!(err, CommitaiError::Ai(AiError::Transport(_))));
    assert!(!err.to_string().contains("test-key"));
}

#[tokio::test]
async fn test_granular_commit_messages_in_one_request() {
    let server = MockServer::start().await;
    mock_reply(
        &server,
        200,
        common::gemini_reply("FILE: a.go\nMESSAGE:\nfix: bug\n---\nFILE: b.go\nMESSAGE:\nfeat: x\n---"),
    )
    .await;

    let changes = vec![
        FileChange::new("a.go", FileStatus::Modified),
        FileChange::new("b.go", FileStatus::Added),
    ];
    let client = GeminiClient::new(&config_for(&server)).unwrap();
    let plan = client
        .generate_commit_messages(&changes, true, &[])
        .await
        .unwrap();

    match plan {
        CommitPlan::PerFile(messages) => {
            assert_eq!(messages.len(), 2);
            assert_eq!(messages["a.go"], "fix: bug");
            assert_eq!(messages["b.go"], "feat: x");
        }
        other => panic!("expected per-file plan, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unframed_granular_reply_applies_to_every_file() {
    let server = MockServer::start().await;
    mock_reply(&server, 200, common::gemini_reply("no framing at all")).await;

    let changes = vec![
        FileChange::new("x.go", FileStatus::Modified),
        FileChange::new("y.go", FileStatus::Modified),
    ];
    let client = GeminiClient::new(&config_for(&server)).unwrap();
    let plan = client
        .generate_commit_messages(&changes, true, &[])
        .await
        .unwrap();

    assert_eq!(plan.message_for("x.go"), "no framing at all");
    assert_eq!(plan.message_for("y.go"), "no framing at all");
}

#[tokio::test]
async fn test_suggest_next_version() {
    let server = MockServer::start().await;
    mock_reply(&server, 200, common::gemini_reply("Explanation...\nv2.3.1\n")).await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    let commits = vec!["abc1234 feat: new api".to_string()];
    let version = client
        .suggest_next_version(&commits, Some("v2.2.0"))
        .await
        .unwrap();

    assert_eq!(version, "2.3.1");
}

#[tokio::test]
async fn test_release_notes_returned_as_is() {
    let server = MockServer::start().await;
    let notes = "Small fixes.\n\n## 🐛 Bug Fixes\n- fix crash\n";
    mock_reply(&server, 200, common::gemini_reply(notes)).await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    let commits = vec!["abc1234 fix: crash".to_string()];
    let generated = client
        .generate_release_notes(&commits, Some("v1.0.0"), "v1.0.1")
        .await
        .unwrap();

    assert_eq!(generated, notes);
}
