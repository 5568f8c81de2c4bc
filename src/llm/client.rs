// ABOUTME: The provider-facing client: builds dialect requests, sends them
// ABOUTME: with bounded retries, and parses the model output into JSON.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::dialect::Dialect;
use super::extract::parse_json_text;
use super::transport::{HttpRequest, ReqwestTransport, Transport};
use super::types::{ClientConfig, GenerationRequest, GenerationResult};
use crate::error::{LlmError, TransportError};

/// Longest backoff between attempts, in seconds.
const MAX_BACKOFF_SECS: u64 = 4;

/// Client for single prompt exchanges against one configured provider.
///
/// Holds no mutable state; concurrent `generate` calls on one instance are
/// independent.
#[derive(Clone)]
pub struct LlmClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl LlmClient {
    /// Create a client that talks to the real network.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client with an injected transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one prompt exchange and parse the model output as JSON.
    ///
    /// The provider identifier picks the wire dialect; an unsupported
    /// provider fails before any network traffic.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, LlmError> {
        let dialect = Dialect::resolve(&self.config.provider)
            .ok_or_else(|| LlmError::UnsupportedProvider(self.config.provider.clone()))?;

        let http_request = HttpRequest {
            url: format!("{}{}", self.config.base_url, dialect.path()),
            headers: dialect.headers(&self.config.api_key),
            body: dialect.body(&self.config.model, request)?,
            timeout: self.config.timeout,
        };

        let payload = self.send_with_retry(&http_request).await?;
        let text = dialect.extract_text(&payload)?;
        parse_json_text(&text)
    }

    /// POST with up to `max_retries` re-attempts on transient failures.
    ///
    /// Only timeouts and connection failures are retried. A non-2xx status is
    /// terminal immediately, as is any other transport failure.
    async fn send_with_retry(&self, request: &HttpRequest) -> Result<Value, LlmError> {
        let mut last_err: Option<TransportError> = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tokio::time::sleep(backoff(attempt - 1)).await;
            }

            match self.transport.send(request).await {
                Ok(response) => return response.error_for_status()?.json(),
                Err(err) if err.is_transient() => last_err = Some(err),
                Err(err) => return Err(err.into()),
            }
        }

        // Every attempt failed transiently; surface the last error. The None
        // arm is unreachable while the loop makes at least one attempt.
        match last_err {
            Some(err) => Err(err.into()),
            None => Err(LlmError::NoResponse),
        }
    }
}

/// Delay before retry `index + 1`: 1s, 2s, then capped at 4s.
fn backoff(index: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(index).min(MAX_BACKOFF_SECS))
}
