//! The step-loop controller.

use std::sync::Arc;

use crate::agent::step::{parse_step, Phase};
use crate::agent::summarizer::Summarizer;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};
use crate::prompt::PromptSelector;
use crate::tools::{ToolDispatcher, ToolRegistry};

/// Hard ceiling on oracle turns per query.
pub const MAX_STEPS: usize = 30;

/// History is compacted every this many steps, starting at the first multiple.
pub const SUMMARIZE_EVERY: usize = 10;

/// Result of one `run_query` call.
#[derive(Debug)]
pub struct QueryOutcome {
    /// Whether the loop reached an OUTPUT step.
    pub completed: bool,
    /// Caller-visible history. Extended with the query and final response on
    /// success; returned as passed in on failure.
    pub history: Vec<ChatMessage>,
}

/// Drives the step protocol for one query at a time.
///
/// Owns the prompt selector, the tool dispatcher, and the summarizer; the
/// oracle is shared between them. The working transcript for a query is local
/// to [`Agent::run_query`] and discarded on failure, so a failed query leaves
/// the caller's history exactly as it was.
pub struct Agent {
    llm: Arc<dyn LlmProvider>,
    selector: PromptSelector,
    dispatcher: ToolDispatcher,
    summarizer: Summarizer,
}

impl Agent {
    /// Create an agent over the given oracle and tool registry.
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        registry: Arc<ToolRegistry>,
        selector_model: impl Into<String>,
    ) -> Self {
        let selector = PromptSelector::new(llm.clone(), selector_model);
        let tool_names = registry.names().iter().map(|n| n.to_string()).collect();
        let summarizer = Summarizer::new(llm.clone(), tool_names);
        let dispatcher = ToolDispatcher::new(registry);
        Self {
            llm,
            selector,
            dispatcher,
            summarizer,
        }
    }

    /// Tool names with descriptions, for the interactive `tools` command.
    pub fn tool_descriptions(&self) -> Vec<(&str, &str)> {
        self.dispatcher.registry().descriptions()
    }

    /// Run the step loop for one query.
    ///
    /// `history` carries prior completed exchanges; it is folded into the
    /// transcript after the system prompt and before the new query.
    pub async fn run_query(&self, query: &str, history: Vec<ChatMessage>) -> QueryOutcome {
        let system_prompt = self.selector.system_prompt(query).await;

        let mut transcript = Vec::with_capacity(history.len() + 2);
        transcript.push(ChatMessage::system(system_prompt));
        transcript.extend(history.iter().cloned());
        transcript.push(ChatMessage::user(query));

        let mut steps = 0;
        while steps < MAX_STEPS {
            if steps >= SUMMARIZE_EVERY && steps % SUMMARIZE_EVERY == 0 {
                if let Some(summary) = self.summarizer.summarize(&transcript[1..], query).await
                {
                    // Only a well-formed SUMMARY step with a tool is usable;
                    // anything else falls through to a normal turn.
                    if summary.phase == Some(Phase::Summary) {
                        if let Some(tool) = summary.tool.clone() {
                            tracing::info!("Executing summarized step with tool '{}'", tool);
                            let result =
                                self.dispatcher.dispatch(&tool, &summary.input).await;
                            transcript.push(ChatMessage::assistant(summary.to_wire_json()));
                            transcript.push(ChatMessage::user(format!(
                                "Summary of last {} steps completed successfully. Result: {}",
                                SUMMARIZE_EVERY, result
                            )));
                            steps += 1;
                            continue;
                        }
                    }
                }
                tracing::debug!("Summarization unusable, continuing with full history");
            }

            let request =
                CompletionRequest::new(transcript.clone()).with_json_object();

            let response = match self.llm.complete(request).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!("Oracle call failed: {}", e);
                    return QueryOutcome {
                        completed: false,
                        history,
                    };
                }
            };

            let step = match parse_step(&response.content) {
                Ok(step) => step,
                Err(e) => {
                    tracing::error!("{}", e);
                    return QueryOutcome {
                        completed: false,
                        history,
                    };
                }
            };

            transcript.push(ChatMessage::assistant(response.content.clone()));

            match step.phase {
                Some(Phase::Action) => {
                    if let Some(tool) = step.tool.as_deref() {
                        let result = self.dispatcher.dispatch(tool, &step.input).await;
                        transcript.push(ChatMessage::user(format!(
                            "Tool '{}' executed with input '{}'. Result: {}",
                            tool, step.input, result
                        )));
                    } else {
                        // Inert: an ACTION without a tool cannot be dispatched.
                        tracing::warn!("ACTION step without a tool, skipping dispatch");
                    }
                }
                Some(Phase::Output) => {
                    let mut history = history;
                    history.push(ChatMessage::user(query));
                    history.push(ChatMessage::assistant(response.content));
                    return QueryOutcome {
                        completed: true,
                        history,
                    };
                }
                // ANALYZE/THINK/RESULT/OBSERVE/SUMMARY and unknown tags carry
                // no controller semantics on a normal turn.
                _ => {}
            }

            steps += 1;
        }

        tracing::warn!("Step budget of {} exhausted without an OUTPUT", MAX_STEPS);
        QueryOutcome {
            completed: false,
            history,
        }
    }
}
