//! Environment-driven configuration.
//!
//! Settings come from the environment (a `.env` file is loaded at startup) and
//! can be overridden by CLI flags. The API key is held as a [`SecretString`]
//! so it never appears in debug output.

use secrecy::SecretString;

/// Default OpenAI-compatible endpoint.
const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default model for the step loop.
const DEFAULT_MODEL: &str = "gpt-4.1";

/// Default model for scenario classification (small and fast on purpose).
const DEFAULT_SELECTOR_MODEL: &str = "gpt-3.5-turbo";

/// Configuration for the LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// API key (bearer token).
    pub api_key: Option<SecretString>,
    /// Model used for step-loop completions.
    pub model: String,
    /// Model used for the short scenario-classification call.
    pub selector_model: String,
}

impl LlmConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("DEVFLOW_BASE_URL")
                .or_else(|_| std::env::var("OPENAI_BASE_URL"))
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .map(SecretString::from),
            model: std::env::var("DEVFLOW_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            selector_model: std::env::var("DEVFLOW_SELECTOR_MODEL")
                .unwrap_or_else(|_| DEFAULT_SELECTOR_MODEL.to_string()),
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the step-loop model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the selector model.
    pub fn with_selector_model(mut self, model: impl Into<String>) -> Self {
        self.selector_model = model.into();
        self
    }
}
