//! Shell execution tool.
//!
//! Runs a command through the platform shell with combined stdout/stderr
//! capture. On Windows, common Unix-ism failures (`mkdir -p`, `touch`) are
//! annotated with hints so the oracle can correct itself on the next turn.
//! The advisory command validator runs in the dispatcher before this tool is
//! reached; there is no sandboxing here.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::ToolError;
use crate::tools::tool::{Tool, ToolInput};

/// Maximum output size before truncation (64KB).
const MAX_OUTPUT_SIZE: usize = 64 * 1024;

/// Shell command execution tool.
#[derive(Debug, Default)]
pub struct RunCommandTool {
    /// Working directory for commands; defaults to the process cwd.
    working_dir: Option<PathBuf>,
}

impl RunCommandTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working directory.
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    async fn run(&self, cmd: &str) -> Result<String, ToolError> {
        tracing::info!("Executing: {}", cmd);

        let mut command = if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", cmd]);
            c
        } else {
            let mut c = Command::new("sh");
            c.args(["-c", cmd]);
            c
        };

        if let Some(ref dir) = self.working_dir {
            command.current_dir(dir);
        }

        let output = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("Failed to spawn command: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        let mut combined = stdout;
        if !stderr.is_empty() {
            combined.push_str(&format!("\nError:\n{}", stderr));
            combined.push_str(&platform_hints(cmd, &stderr));
        }

        if let Some(code) = output.status.code() {
            if code != 0 {
                combined.push_str(&format!("\n(command exited with status {})", code));
            }
        }

        Ok(truncate_output(&combined))
    }
}

#[async_trait]
impl Tool for RunCommandTool {
    fn name(&self) -> &str {
        "run_command"
    }

    fn description(&self) -> &str {
        "Execute any shell command (cross-platform)"
    }

    async fn execute(&self, input: &ToolInput) -> Result<String, ToolError> {
        let command = input
            .as_text()
            .or_else(|| input.str_param("command"))
            .ok_or_else(|| {
                ToolError::InvalidParameters("expected a command string".to_string())
            })?;

        self.run(command).await
    }
}

/// Hints for common cross-platform command mistakes, appended to stderr.
fn platform_hints(cmd: &str, stderr: &str) -> String {
    if !cfg!(target_os = "windows") {
        return String::new();
    }

    if stderr
        .to_lowercase()
        .contains("syntax of the command is incorrect")
    {
        if cmd.contains("mkdir -p") {
            return "\n\nWindows tip: 'mkdir -p' is not supported. Use individual mkdir \
                    commands: mkdir folder, then mkdir folder\\subfolder."
                .to_string();
        }
        if cmd.contains("touch") {
            return "\n\nWindows tip: 'touch' is not available. Use 'echo. > filename' to \
                    create an empty file."
                .to_string();
        }
    }

    String::new()
}

/// Truncate output to fit within limits, keeping head and tail.
fn truncate_output(s: &str) -> String {
    if s.len() <= MAX_OUTPUT_SIZE {
        s.to_string()
    } else {
        let half = MAX_OUTPUT_SIZE / 2;
        let head_end = (0..=half).rev().find(|i| s.is_char_boundary(*i)).unwrap_or(0);
        let tail_start = (s.len() - half..s.len())
            .find(|i| s.is_char_boundary(*i))
            .unwrap_or(s.len());
        format!(
            "{}\n\n... [truncated {} bytes] ...\n\n{}",
            &s[..head_end],
            s.len() - MAX_OUTPUT_SIZE,
            &s[tail_start..]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_command() {
        let tool = RunCommandTool::new();
        let result = tool
            .execute(&ToolInput::Text("echo hello".to_string()))
            .await
            .unwrap();
        assert!(result.contains("hello"));
    }

    #[tokio::test]
    async fn test_command_from_named_input() {
        let tool = RunCommandTool::new();
        let input = ToolInput::from_value(serde_json::json!({"command": "echo named"}));
        let result = tool.execute(&input).await.unwrap();
        assert!(result.contains("named"));
    }

    #[tokio::test]
    async fn test_failing_command_reports_status() {
        let tool = RunCommandTool::new();
        let result = tool
            .execute(&ToolInput::Text("false".to_string()))
            .await
            .unwrap();
        assert!(result.contains("exited with status 1"));
    }

    #[tokio::test]
    async fn test_stderr_is_captured() {
        let tool = RunCommandTool::new();
        let result = tool
            .execute(&ToolInput::Text("ls /definitely/not/a/path".to_string()))
            .await
            .unwrap();
        assert!(result.contains("Error:"));
    }

    #[tokio::test]
    async fn test_non_command_input_rejected() {
        let tool = RunCommandTool::new();
        let input = ToolInput::from_value(serde_json::json!(42));
        assert!(matches!(
            tool.execute(&input).await,
            Err(ToolError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_truncate_output_keeps_head_and_tail() {
        let long = "a".repeat(MAX_OUTPUT_SIZE + 100);
        let truncated = truncate_output(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.contains("truncated 100 bytes"));
    }
}
