//! File read/write tools.

use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use crate::error::ToolError;
use crate::tools::tool::{Tool, ToolInput};

/// Read file contents tool.
#[derive(Debug, Default)]
pub struct ReadFileTool;

impl ReadFileTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read file contents"
    }

    async fn execute(&self, input: &ToolInput) -> Result<String, ToolError> {
        let filename = input
            .as_text()
            .or_else(|| input.str_param("filename"))
            .ok_or_else(|| {
                ToolError::InvalidParameters("expected a filename".to_string())
            })?;

        tracing::info!("Reading file: {}", filename);

        let content = fs::read_to_string(filename)
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("Error reading '{}': {}", filename, e)))?;

        Ok(format!(
            "File '{}' content ({} characters):\n{}",
            filename,
            content.chars().count(),
            content
        ))
    }
}

/// Write file contents tool. Overwrites and creates parent directories.
#[derive(Debug, Default)]
pub struct WriteFileTool;

impl WriteFileTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file"
    }

    async fn execute(&self, input: &ToolInput) -> Result<String, ToolError> {
        let filename = input.str_param("filename").ok_or_else(|| {
            ToolError::InvalidParameters("missing 'filename' parameter".to_string())
        })?;
        let content = input.str_param("content").ok_or_else(|| {
            ToolError::InvalidParameters("missing 'content' parameter".to_string())
        })?;

        if let Some(parent) = Path::new(filename).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    ToolError::ExecutionFailed(format!("Failed to create directories: {}", e))
                })?;
                tracing::debug!("Created directory: {}", parent.display());
            }
        }

        fs::write(filename, content).await.map_err(|e| {
            ToolError::ExecutionFailed(format!("Error creating '{}': {}", filename, e))
        })?;

        tracing::info!("Created file: {} ({} bytes)", filename, content.len());

        Ok(format!(
            "Successfully created '{}' ({} bytes)",
            filename,
            content.len()
        ))
    }
}
