// ABOUTME: Anthropic-style messages dialect.
// ABOUTME: Payload types, x-api-key headers, and content block extraction.

use serde::Serialize;
use serde_json::Value;

use super::openai;
use super::types::GenerationRequest;
use crate::error::LlmError;

/// Endpoint path appended to the configured base URL.
pub const MESSAGES_PATH: &str = "/v1/messages";

/// Protocol version header sent with every messages-dialect request.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// The messages dialect requires an explicit completion budget.
const MAX_TOKENS: u32 = 4096;

/// Messages request format.
#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub temperature: f64,
    pub messages: Vec<MessagesMessage>,
}

/// Messages message format.
#[derive(Debug, Serialize)]
pub struct MessagesMessage {
    pub role: String,
    pub content: Vec<ContentBlock>,
}

/// Content block within a messages-dialect message.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
}

impl MessagesRequest {
    pub(crate) fn new(model: &str, request: &GenerationRequest) -> Result<Self, LlmError> {
        Ok(Self {
            model: model.to_string(),
            max_tokens: MAX_TOKENS,
            system: request.system_prompt.clone(),
            temperature: request.temperature,
            messages: vec![MessagesMessage {
                role: "user".to_string(),
                content: vec![ContentBlock::Text {
                    text: request.user_content()?,
                }],
            }],
        })
    }
}

/// Headers for the messages dialect.
pub(crate) fn headers(api_key: &str) -> Vec<(String, String)> {
    vec![
        ("x-api-key".to_string(), api_key.to_string()),
        ("anthropic-version".to_string(), ANTHROPIC_VERSION.to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ]
}

/// Assistant text from a messages response.
///
/// Providers disagree on the exact shape, so lookup is ordered: text content
/// blocks first (thinking and other block kinds are skipped), then a bare
/// string `content`, then the chat-completions shape some gateways answer
/// with.
pub(crate) fn extract_text(payload: &Value) -> Result<String, LlmError> {
    if let Some(blocks) = payload.get("content").and_then(Value::as_array) {
        let texts: Vec<&str> = blocks
            .iter()
            .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|block| block.get("text").and_then(Value::as_str))
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .collect();
        if !texts.is_empty() {
            return Ok(texts.join("\n"));
        }
    }

    if let Some(content) = payload.get("content").and_then(Value::as_str) {
        if !content.trim().is_empty() {
            return Ok(content.to_string());
        }
    }

    if let Some(content) = openai::first_choice_content(payload) {
        let trimmed = content.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    Err(LlmError::MissingContent)
}
