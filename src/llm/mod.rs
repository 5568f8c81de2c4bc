// ABOUTME: LLM module - dialect-aware client for provider HTTP APIs.
// ABOUTME: Defines config types, the transport seam, and the client itself.

mod anthropic;
mod client;
mod dialect;
mod extract;
mod openai;
mod transport;
mod types;

pub use anthropic::*;
pub use client::*;
pub use dialect::*;
pub use openai::*;
pub use transport::*;
pub use types::*;
