//! Error types shared across the crate.

use std::time::Duration;

use thiserror::Error;

/// Error type for oracle (LLM) calls.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM request failed ({provider}): {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Authentication failed ({provider})")]
    AuthFailed { provider: String },

    #[error("Rate limited ({provider}), retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// Error type for tool execution.
///
/// These never escape the dispatcher as errors; they are converted to result
/// text so the oracle can see what went wrong and adapt on the next turn.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

impl From<std::io::Error> for ToolError {
    fn from(err: std::io::Error) -> Self {
        ToolError::ExecutionFailed(err.to_string())
    }
}

/// Failure to extract a structured step from raw oracle output.
#[derive(Debug, Error)]
#[error("Failed to parse step: {reason}. Response text: {text}")]
pub struct StepParseError {
    pub reason: String,
    pub text: String,
}
