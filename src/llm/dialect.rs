// ABOUTME: Maps provider identifiers onto one of two wire dialects.
// ABOUTME: Each dialect routes path, headers, payload, and text extraction.

use serde_json::Value;

use super::types::GenerationRequest;
use super::{anthropic, openai};
use crate::error::LlmError;

/// The wire dialect a provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// OpenAI-style `POST /v1/chat/completions`.
    ChatCompletions,
    /// Anthropic-style `POST /v1/messages`.
    Messages,
}

impl Dialect {
    /// Resolve a provider identifier to its dialect. The identifier is
    /// trimmed and matched case-insensitively; unknown providers yield
    /// `None`.
    pub fn resolve(provider: &str) -> Option<Self> {
        match provider.trim().to_lowercase().as_str() {
            "deepseek" => Some(Dialect::ChatCompletions),
            "zhipu" | "glm" | "bigmodel" | "minimax" | "anthropic" => Some(Dialect::Messages),
            _ => None,
        }
    }

    /// Endpoint path appended to the configured base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Dialect::ChatCompletions => openai::CHAT_COMPLETIONS_PATH,
            Dialect::Messages => anthropic::MESSAGES_PATH,
        }
    }

    pub(crate) fn headers(&self, api_key: &str) -> Vec<(String, String)> {
        match self {
            Dialect::ChatCompletions => openai::headers(api_key),
            Dialect::Messages => anthropic::headers(api_key),
        }
    }

    pub(crate) fn body(&self, model: &str, request: &GenerationRequest) -> Result<Value, LlmError> {
        let body = match self {
            Dialect::ChatCompletions => {
                serde_json::to_value(openai::ChatRequest::new(model, request)?)?
            }
            Dialect::Messages => {
                serde_json::to_value(anthropic::MessagesRequest::new(model, request)?)?
            }
        };
        Ok(body)
    }

    pub(crate) fn extract_text(&self, payload: &Value) -> Result<String, LlmError> {
        match self {
            Dialect::ChatCompletions => openai::extract_text(payload),
            Dialect::Messages => anthropic::extract_text(payload),
        }
    }
}
