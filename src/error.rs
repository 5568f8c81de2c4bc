// ABOUTME: Defines all error types for the relay library using thiserror.
// ABOUTME: Transport failures carry their own retry classification.

/// Errors from LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("no textual content found in response")]
    MissingContent,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("environment variable {0} not set")]
    MissingApiKey(String),

    #[error("request finished without a response payload")]
    NoResponse,
}

/// Failure of a single transport attempt.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport failure: {0}")]
    Other(String),
}

impl TransportError {
    /// Whether the failure is worth another attempt. Only timeouts and
    /// connection failures qualify.
    pub fn is_transient(&self) -> bool {
        matches!(self, TransportError::Timeout(_) | TransportError::Connect(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}
