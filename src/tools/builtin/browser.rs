//! Browser launch tool.

use async_trait::async_trait;

use crate::error::ToolError;
use crate::tools::tool::{Tool, ToolInput};

/// Opens a URL in the default browser.
#[derive(Debug, Default)]
pub struct OpenBrowserTool;

impl OpenBrowserTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for OpenBrowserTool {
    fn name(&self) -> &str {
        "open_browser"
    }

    fn description(&self) -> &str {
        "Open URL in browser"
    }

    async fn execute(&self, input: &ToolInput) -> Result<String, ToolError> {
        let url = input
            .as_text()
            .or_else(|| input.str_param("url"))
            .ok_or_else(|| ToolError::InvalidParameters("expected a URL".to_string()))?;

        tracing::info!("Opening browser: {}", url);

        open::that(url)
            .map_err(|e| ToolError::ExecutionFailed(format!("Error opening URL: {}", e)))?;

        Ok(format!("Opened {} in browser", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_url_rejected() {
        let tool = OpenBrowserTool::new();
        let input = ToolInput::from_value(serde_json::json!({"link": "http://x"}));
        assert!(matches!(
            tool.execute(&input).await,
            Err(ToolError::InvalidParameters(_))
        ));
    }
}
