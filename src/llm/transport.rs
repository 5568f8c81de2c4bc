// ABOUTME: HTTP transport seam between the client and the network.
// ABOUTME: One trait method, plain value types, and a reqwest implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{LlmError, TransportError};

/// One outbound POST, fully described.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
    pub timeout: Duration,
}

/// Raw result of one attempt: status plus the undecoded body text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Fail on a non-2xx status. Status errors are terminal for the whole
    /// operation; the retry loop never re-attempts them.
    pub fn error_for_status(self) -> Result<Self, LlmError> {
        if (200..300).contains(&self.status) {
            Ok(self)
        } else {
            Err(LlmError::Api {
                status: self.status,
                message: self.body,
            })
        }
    }

    /// Decode the body as JSON.
    pub fn json(&self) -> Result<Value, LlmError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Trait for sending a single HTTP request.
///
/// Satisfied by [`ReqwestTransport`] in production and by scripted doubles in
/// tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the raw response.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Transport backed by a shared reqwest client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .http
            .post(&request.url)
            .timeout(request.timeout)
            .json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse::new(status, body))
    }
}
