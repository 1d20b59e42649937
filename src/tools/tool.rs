//! Tool trait and input type.

use async_trait::async_trait;

use crate::agent::StepInput;
use crate::error::ToolError;

/// Input payload handed to a tool.
///
/// Alias of the step input shape: a tool receives exactly what the oracle put
/// in the step's `input` field, already classified into its tagged variant.
pub type ToolInput = StepInput;

/// Trait for tools the loop can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Registered tool name.
    fn name(&self) -> &str;

    /// One-line description shown in tool listings and "not found" messages.
    fn description(&self) -> &str;

    /// Execute the tool with the given input.
    ///
    /// Each tool adapts the input shapes it understands and returns
    /// `InvalidParameters` for the rest. The returned text is fed back into
    /// the conversation verbatim.
    async fn execute(&self, input: &ToolInput) -> Result<String, ToolError>;
}

/// A trivial tool for testing the registry and dispatcher.
#[cfg(test)]
#[derive(Debug)]
pub struct EchoTool;

#[cfg(test)]
#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echoes back the input text. Useful for testing."
    }

    async fn execute(&self, input: &ToolInput) -> Result<String, ToolError> {
        match input.as_text() {
            Some(text) => Ok(text.to_string()),
            None => Err(ToolError::InvalidParameters(
                "echo expects a string input".to_string(),
            )),
        }
    }
}
