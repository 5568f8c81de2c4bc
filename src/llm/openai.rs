// ABOUTME: OpenAI-style chat-completions dialect.
// ABOUTME: Payload types, bearer-auth headers, and response text lookup.

use serde::Serialize;
use serde_json::Value;

use super::types::GenerationRequest;
use crate::error::LlmError;

/// Endpoint path appended to the configured base URL.
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Chat-completions request format.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f64,
    pub messages: Vec<ChatMessage>,
}

/// Chat-completions message format.
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatRequest {
    pub(crate) fn new(model: &str, request: &GenerationRequest) -> Result<Self, LlmError> {
        Ok(Self {
            model: model.to_string(),
            temperature: request.temperature,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_content()?,
                },
            ],
        })
    }
}

/// Headers for the chat-completions dialect.
pub(crate) fn headers(api_key: &str) -> Vec<(String, String)> {
    vec![
        ("Authorization".to_string(), format!("Bearer {}", api_key)),
        ("Content-Type".to_string(), "application/json".to_string()),
    ]
}

/// Assistant text at `choices[0].message.content`.
pub(crate) fn extract_text(payload: &Value) -> Result<String, LlmError> {
    first_choice_content(payload)
        .map(str::to_string)
        .ok_or(LlmError::MissingContent)
}

/// Lookup for the chat-completions response shape. The messages dialect also
/// falls back to this for gateways that answer in chat shape.
pub(crate) fn first_choice_content(payload: &Value) -> Option<&str> {
    payload
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
}
