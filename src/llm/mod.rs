//! LLM integration for the step loop.
//!
//! The oracle is modeled as an injected capability behind [`LlmProvider`], so
//! the controller, prompt selector, and summarizer are unit-testable with
//! deterministic stubs. The only concrete implementation talks to an
//! OpenAI-compatible chat completions endpoint.

mod openai;
mod provider;

pub use openai::OpenAiProvider;
pub use provider::{ChatMessage, CompletionRequest, CompletionResponse, LlmProvider, Role};

use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::LlmError;

/// Create an LLM provider based on configuration.
pub fn create_llm_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    tracing::info!(
        "Using OpenAI-compatible API at {} (model: {})",
        config.base_url,
        config.model
    );
    Ok(Arc::new(OpenAiProvider::new(config.clone())?))
}
