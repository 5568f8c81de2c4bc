// ABOUTME: Root module for relay - structured JSON generation over LLM provider APIs.
// ABOUTME: Re-exports all public types from submodules.

pub mod error;
pub mod llm;
pub mod prelude;

pub use error::{LlmError, TransportError};
