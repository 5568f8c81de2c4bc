// ABOUTME: Core types for the client - provider configuration and
// ABOUTME: single-exchange generation requests.

use std::time::Duration;

use serde_json::Value;

use crate::error::LlmError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Directive appended to the user prompt when a schema is supplied.
const SCHEMA_HINT: &str = "\n\nReturn JSON only that matches this schema (no markdown):\n";

/// Parsed model output. Providers are asked for a JSON object, but nothing
/// beyond "valid JSON" is enforced.
pub type GenerationResult = Value;

/// Configuration binding a client to one provider endpoint.
///
/// Immutable for the lifetime of the client that holds it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl ClientConfig {
    /// Create a configuration. Trailing slashes are stripped from `base_url`
    /// so endpoint paths can be appended verbatim.
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a configuration with the API key read from the
    /// `<PROVIDER>_API_KEY` environment variable.
    pub fn from_env(
        provider: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let provider = provider.into();
        let var = format!("{}_API_KEY", provider.trim().to_uppercase());
        let api_key = std::env::var(&var).map_err(|_| LlmError::MissingApiKey(var))?;
        Ok(Self::new(provider, model, api_key, base_url))
    }

    /// Set the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how many times a transient failure is re-attempted.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// A single prompt exchange.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub schema: Option<Value>,
    pub temperature: f64,
}

impl GenerationRequest {
    /// Create a request with the given system and user prompts.
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            schema: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Ask the model to shape its output after the given JSON schema.
    pub fn schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// User prompt with the schema directive appended when a schema is set.
    /// The schema is serialized compactly, without markdown fencing.
    pub(crate) fn user_content(&self) -> Result<String, LlmError> {
        match &self.schema {
            None => Ok(self.user_prompt.clone()),
            Some(schema) => {
                let compact = serde_json::to_string(schema)?;
                Ok(format!("{}{}{}", self.user_prompt, SCHEMA_HINT, compact))
            }
        }
    }
}
