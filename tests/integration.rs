// ABOUTME: Integration tests driving the public API end to end.
// ABOUTME: Exercises both dialects through an injected transport.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use relay::prelude::*;
use serde_json::json;

/// Transport that fails transiently for the first `failures` calls, then
/// answers every call with the same body.
struct FlakyTransport {
    failures: usize,
    body: String,
    calls: AtomicUsize,
    last_request: Mutex<Option<HttpRequest>>,
}

impl FlakyTransport {
    fn new(failures: usize, body: impl Into<String>) -> Self {
        Self {
            failures,
            body: body.into(),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    fn reliable(body: impl Into<String>) -> Self {
        Self::new(0, body)
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> HttpRequest {
        self.last_request.lock().unwrap().clone().expect("no request sent")
    }
}

#[async_trait::async_trait]
impl Transport for FlakyTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        *self.last_request.lock().unwrap() = Some(request.clone());
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(TransportError::Timeout("simulated timeout".to_string()));
        }
        Ok(HttpResponse::new(200, self.body.clone()))
    }
}

fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
    request
        .headers
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

#[tokio::test(start_paused = true)]
async fn test_deepseek_retries_timeouts_then_parses_json() {
    let transport = Arc::new(FlakyTransport::new(
        2,
        r#"{"choices": [{"message": {"content": "{\"ok\": true}"}}]}"#,
    ));
    let config = ClientConfig::new(
        "deepseek",
        "deepseek-chat",
        "key",
        "https://api.deepseek.com",
    )
    .max_retries(3);
    let client = LlmClient::with_transport(config, transport.clone());

    let result = client
        .generate(&GenerationRequest::new("sys", "user"))
        .await
        .unwrap();

    assert_eq!(result["ok"], true);
    assert_eq!(transport.calls(), 3);
    assert_eq!(
        transport.last_request().url,
        "https://api.deepseek.com/v1/chat/completions"
    );
}

#[tokio::test]
async fn test_zhipu_uses_messages_endpoint() {
    let transport = Arc::new(FlakyTransport::reliable(
        r#"{"content": [
            {"type": "thinking", "thinking": "analysis"},
            {"type": "text", "text": "{\"ok\": true}"}
        ]}"#,
    ));
    let config = ClientConfig::new(
        "zhipu",
        "GLM-4.7",
        "zhipu-key",
        "https://open.bigmodel.cn/api/coding/paas/v4",
    );
    let client = LlmClient::with_transport(config, transport.clone());

    let result = client
        .generate(&GenerationRequest::new("sys", "user"))
        .await
        .unwrap();

    assert_eq!(result["ok"], true);
    let request = transport.last_request();
    assert_eq!(
        request.url,
        "https://open.bigmodel.cn/api/coding/paas/v4/v1/messages"
    );
    assert_eq!(header(&request, "x-api-key"), Some("zhipu-key"));
    assert_eq!(header(&request, "anthropic-version"), Some("2023-06-01"));
    assert_eq!(request.body["model"], "GLM-4.7");
    assert_eq!(request.body["messages"][0]["content"][0]["type"], "text");
}

#[tokio::test]
async fn test_minimax_base_url_with_path_segment() {
    let transport = Arc::new(FlakyTransport::reliable(
        r#"{"content": [{"type": "text", "text": "{\"ok\": true}"}]}"#,
    ));
    let config = ClientConfig::new(
        "minimax",
        "MiniMax-M2.1",
        "minimax-key",
        "https://api.minimaxi.com/anthropic",
    );
    let client = LlmClient::with_transport(config, transport.clone());

    let result = client
        .generate(&GenerationRequest::new("sys", "user"))
        .await
        .unwrap();

    assert_eq!(result["ok"], true);
    let request = transport.last_request();
    assert_eq!(request.url, "https://api.minimaxi.com/anthropic/v1/messages");
    assert_eq!(header(&request, "x-api-key"), Some("minimax-key"));
    assert_eq!(request.body["model"], "MiniMax-M2.1");
}

#[tokio::test]
async fn test_schema_constrains_user_content() {
    let transport = Arc::new(FlakyTransport::reliable(
        r#"{"choices": [{"message": {"content": "{\"name\": \"Alice\"}"}}]}"#,
    ));
    let config = ClientConfig::new("deepseek", "deepseek-chat", "key", "https://api.deepseek.com");
    let client = LlmClient::with_transport(config, transport.clone());

    let schema = json!({"type": "object", "properties": {"name": {"type": "string"}}});
    let result = client
        .generate(&GenerationRequest::new("sys", "who am I?").schema(schema.clone()))
        .await
        .unwrap();

    assert_eq!(result, json!({"name": "Alice"}));
    let content = transport.last_request().body["messages"][1]["content"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(content.starts_with("who am I?"));
    assert!(content.ends_with(&serde_json::to_string(&schema).unwrap()));
}

#[tokio::test]
async fn test_unsupported_provider_fails_without_traffic() {
    let transport = Arc::new(FlakyTransport::reliable("{}"));
    let config = ClientConfig::new("gemini", "gemini-pro", "key", "https://example.com");
    let client = LlmClient::with_transport(config, transport.clone());

    let err = client
        .generate(&GenerationRequest::new("sys", "user"))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::UnsupportedProvider(_)));
    assert_eq!(transport.calls(), 0);
}
