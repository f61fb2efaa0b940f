//! HTTP assistant tests against a mock backend

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::HttpAssistant;
use crate::application::errors::AssistantError;
use crate::domain::traits::Assistant;
use crate::infrastructure::config::AssistantConfig;

fn assistant_for(server: &MockServer) -> HttpAssistant {
    let config = AssistantConfig {
        endpoint: format!("{}/", server.uri()),
        request_timeout_secs: None,
    };
    HttpAssistant::new(&config).expect("client")
}

#[tokio::test]
async fn test_reply_posts_message_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({ "message": "hi" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "reply": "Hello!" })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = assistant_for(&server).reply("hi").await.expect("reply");
    assert_eq!(reply, "Hello!");
}

#[tokio::test]
async fn test_non_success_status_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let err = assistant_for(&server).reply("hi").await.unwrap_err();
    match err {
        AssistantError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_payload_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = assistant_for(&server).reply("hi").await.unwrap_err();
    assert!(matches!(err, AssistantError::Payload(_)), "{:?}", err);
}

#[tokio::test]
async fn test_missing_or_non_string_reply_is_payload_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({ "message": "missing" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "answer": "x" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({ "message": "number" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "reply": 42 })))
        .mount(&server)
        .await;

    let assistant = assistant_for(&server);
    assert!(matches!(assistant.reply("missing").await, Err(AssistantError::Payload(_))));
    assert!(matches!(assistant.reply("number").await, Err(AssistantError::Payload(_))));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let config = AssistantConfig {
        endpoint: format!("http://127.0.0.1:{}", port),
        request_timeout_secs: None,
    };
    let assistant = HttpAssistant::new(&config).expect("client");

    let err = assistant.reply("hi").await.unwrap_err();
    assert!(matches!(err, AssistantError::Transport(_)), "{:?}", err);
}

#[tokio::test]
async fn test_configured_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "reply": "late" }))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = AssistantConfig {
        endpoint: server.uri(),
        request_timeout_secs: Some(1),
    };
    let assistant = HttpAssistant::new(&config).expect("client");

    let err = assistant.reply("hi").await.unwrap_err();
    assert!(matches!(err, AssistantError::Transport(_)), "{:?}", err);
}
