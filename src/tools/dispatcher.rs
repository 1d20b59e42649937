//! Tool dispatch: the mediation layer between oracle output and side effects.

use std::sync::Arc;

use crate::safety::{CommandValidator, Verdict};
use crate::tools::registry::ToolRegistry;
use crate::tools::tool::ToolInput;

/// Name of the shell tool, the only one gated by the command validator.
const SHELL_TOOL: &str = "run_command";

/// Resolves tool names, gates shell commands, and absorbs failures.
///
/// Dispatch never returns an error: unknown tools, validator rejections, and
/// execution failures all become descriptive result text that is appended to
/// the transcript so the oracle can self-correct on the next turn.
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
    validator: CommandValidator,
}

impl ToolDispatcher {
    /// Create a dispatcher over the given registry.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            validator: CommandValidator::new(),
        }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute the named tool with the given input, converting every failure
    /// into result text.
    pub async fn dispatch(&self, tool_name: &str, input: &ToolInput) -> String {
        let Some(tool) = self.registry.get(tool_name) else {
            return format!(
                "Tool '{}' not found. Available tools: {:?}",
                tool_name,
                self.registry.names()
            );
        };

        if tool_name == SHELL_TOOL {
            if let Verdict::Reject(reason) = self.validator.validate(input) {
                tracing::warn!("Rejected command for '{}': {}", tool_name, reason);
                return format!(
                    "Command validation failed: {}. The command was not executed.",
                    reason
                );
            }
        }

        tracing::debug!("Executing {} with input: {}", tool_name, input);

        match tool.execute(input).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Tool '{}' failed: {}", tool_name, e);
                format!(
                    "Error executing tool '{}' with input '{}': {}",
                    tool_name, input, e
                )
            }
        }
    }
}
