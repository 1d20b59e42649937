//! Periodic history summarization.
//!
//! As the transcript grows, so does the token cost of every oracle call. The
//! summarizer periodically collapses the accumulated history into one simple
//! single-operation SUMMARY step. This is deliberately lossy compaction, not
//! a full memory; the constraints on the produced step (single uncompounded
//! operations, no chained shell operators) are enforced by the oracle's
//! instructions, not re-validated here beyond shape checks.

use std::sync::Arc;

use crate::agent::step::{parse_step, Step};
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

/// System message for the summarization call. Also serves as the marker by
/// which summarizer traffic is distinguishable from step-loop traffic.
pub const SUMMARIZER_SYSTEM_PROMPT: &str =
    "You are an efficient task optimizer. Create simple, reliable single steps. \
     Avoid complex multi-step commands.";

/// Compacts conversation history into a single simplified step.
pub struct Summarizer {
    llm: Arc<dyn LlmProvider>,
    /// Tool names advertised to the oracle.
    tool_names: Vec<String>,
}

impl Summarizer {
    /// Create a summarizer backed by the given oracle.
    pub fn new(llm: Arc<dyn LlmProvider>, tool_names: Vec<String>) -> Self {
        Self { llm, tool_names }
    }

    /// Ask the oracle to compress the history into one SUMMARY step.
    ///
    /// `history` is the transcript excluding the leading system message.
    /// Returns `None` on any oracle or parse failure; the caller falls back
    /// to a normal iteration, so summarization failure is never fatal.
    pub async fn summarize(&self, history: &[ChatMessage], query: &str) -> Option<Step> {
        let prompt = self.build_prompt(history, query)?;

        let request = CompletionRequest::new(vec![
            ChatMessage::system(SUMMARIZER_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ])
        .with_json_object();

        let response = match self.llm.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Summarization call failed: {}", e);
                return None;
            }
        };

        match parse_step(&response.content) {
            Ok(step) => Some(step),
            Err(e) => {
                tracing::warn!("Summarization produced unparseable step: {}", e);
                None
            }
        }
    }

    fn build_prompt(&self, history: &[ChatMessage], query: &str) -> Option<String> {
        let history_json = match serde_json::to_string_pretty(history) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize history for summarization: {}", e);
                return None;
            }
        };

        Some(format!(
            r#"Analyze the conversation history and create a simple, reliable single step to complete the task.

User Query: {query}

Conversation History:
{history_json}

IMPORTANT RULES:
1. Create SIMPLE, SINGLE commands - avoid complex multi-step commands with && operators
2. Focus on the most essential step to move the task forward
3. Use write_file for creating files, run_command for simple commands
4. Avoid trying to do everything in one command

Return in JSON format:
{{"step":"SUMMARY","tool":"tool_name","input":"simple_input","content":"description"}}

Available tools: {tools:?}

Examples of GOOD inputs:
- run_command: "npm create vite@latest my-app -- --template react"
- write_file: {{"filename":"app.py","content":"print('Hello')"}}
- run_command: "mkdir my-project"

Examples of BAD inputs (avoid these):
- run_command: "npm create vite@latest frontend -- --template react && cd frontend && npm install && npm install -D tailwindcss postcss autoprefixer && echo 'config' > postcss.config.js""#,
            tools = self.tool_names,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::step::Phase;
    use crate::error::LlmError;
    use crate::llm::CompletionResponse;
    use async_trait::async_trait;

    struct StubOracle {
        reply: Result<&'static str, ()>,
    }

    #[async_trait]
    impl LlmProvider for StubOracle {
        async fn complete(
            &self,
            req: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            // The summarizer always leads with its optimizer system message.
            assert_eq!(req.messages[0].content, SUMMARIZER_SYSTEM_PROMPT);
            match self.reply {
                Ok(text) => Ok(CompletionResponse {
                    content: text.to_string(),
                }),
                Err(()) => Err(LlmError::RequestFailed {
                    provider: "stub".to_string(),
                    reason: "down".to_string(),
                }),
            }
        }

        fn model_name(&self) -> &str {
            "stub"
        }
    }

    fn summarizer(reply: Result<&'static str, ()>) -> Summarizer {
        Summarizer::new(
            Arc::new(StubOracle { reply }),
            vec!["run_command".to_string(), "write_file".to_string()],
        )
    }

    fn sample_history() -> Vec<ChatMessage> {
        vec![
            ChatMessage::user("make a project"),
            ChatMessage::assistant(r#"{"step":"THINK","tool":"","input":"","content":"ok"}"#),
        ]
    }

    #[tokio::test]
    async fn test_summarize_produces_step() {
        let s = summarizer(Ok(
            r#"{"step":"SUMMARY","tool":"run_command","input":"mkdir demo","content":"create dir"}"#,
        ));

        let step = s.summarize(&sample_history(), "make a project").await.unwrap();
        assert_eq!(step.phase, Some(Phase::Summary));
        assert_eq!(step.tool.as_deref(), Some("run_command"));
    }

    #[tokio::test]
    async fn test_oracle_failure_yields_none() {
        let s = summarizer(Err(()));
        assert!(s.summarize(&sample_history(), "q").await.is_none());
    }

    #[tokio::test]
    async fn test_unparseable_response_yields_none() {
        let s = summarizer(Ok("sorry, I cannot help with that"));
        assert!(s.summarize(&sample_history(), "q").await.is_none());
    }

    #[tokio::test]
    async fn test_prompt_mentions_query_and_tools() {
        let s = summarizer(Ok("{}"));
        let prompt = s.build_prompt(&sample_history(), "build the thing").unwrap();
        assert!(prompt.contains("build the thing"));
        assert!(prompt.contains("run_command"));
        assert!(prompt.contains("write_file"));
    }
}
