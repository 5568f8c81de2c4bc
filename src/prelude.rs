// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use relay::prelude::*;` to get started quickly.

pub use crate::error::{LlmError, TransportError};
pub use crate::llm::{
    ClientConfig, Dialect, GenerationRequest, GenerationResult, HttpRequest, HttpResponse,
    LlmClient, ReqwestTransport, Transport,
};
