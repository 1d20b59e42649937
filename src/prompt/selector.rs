//! Oracle-backed scenario classification with a per-process prompt cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};
use crate::prompt::scenario::Scenario;
use crate::prompt::{BASE_PROMPT, GENERIC_GUIDANCE};

/// Classifies user queries into scenarios and composes system prompts.
///
/// The cache is keyed by exact query text, so semantically identical but
/// textually different queries miss. It is unbounded and lives for the
/// process; a single in-flight query at a time is assumed, so a plain
/// `Mutex` is enough.
pub struct PromptSelector {
    llm: Arc<dyn LlmProvider>,
    /// Model used for the short classification call.
    selector_model: String,
    cache: Mutex<HashMap<String, String>>,
}

impl PromptSelector {
    /// Create a selector backed by the given oracle.
    pub fn new(llm: Arc<dyn LlmProvider>, selector_model: impl Into<String>) -> Self {
        Self {
            llm,
            selector_model: selector_model.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Return the composed system prompt for a query.
    ///
    /// Issues at most one classification call per distinct query text for the
    /// lifetime of the process; later calls with the same text are served
    /// from the cache.
    pub async fn system_prompt(&self, query: &str) -> String {
        if let Some(cached) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(query)
        {
            tracing::debug!("Using cached prompt for query");
            return cached.clone();
        }

        let scenario = self.classify(query).await;
        tracing::info!("Selected scenario: {}", scenario);

        let prompt = compose_prompt(scenario, query);

        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(query.to_string(), prompt.clone());

        prompt
    }

    /// Classify the query into a scenario.
    ///
    /// Any oracle failure or out-of-vocabulary token falls back to
    /// [`Scenario::Generic`]; classification is never fatal.
    async fn classify(&self, query: &str) -> Scenario {
        let request = CompletionRequest::new(vec![
            ChatMessage::system("You are a prompt selector. Return only the scenario name."),
            ChatMessage::user(classification_prompt(query)),
        ])
        .with_model(self.selector_model.clone())
        .with_max_tokens(10)
        .with_temperature(0.1);

        match self.llm.complete(request).await {
            Ok(response) => match Scenario::parse(&response.content) {
                Some(scenario) => scenario,
                None => {
                    tracing::warn!(
                        "Invalid scenario token '{}', using generic",
                        response.content.trim()
                    );
                    Scenario::Generic
                }
            },
            Err(e) => {
                tracing::warn!("Scenario classification failed: {}, using generic", e);
                Scenario::Generic
            }
        }
    }
}

/// Build the classification request body.
fn classification_prompt(query: &str) -> String {
    format!(
        r#"Analyze this user query and select the most appropriate development scenario:

User Query: "{query}"

Available scenarios:
- react: React/frontend applications, UI components, todo apps
- python: Python scripts, automation, data processing
- fastapi: FastAPI backend APIs, REST endpoints
- django: Django backend, admin panels, ORM
- node: Node.js/Express backends, JavaScript servers
- fullstack: Complete applications with frontend + backend
- debug: Debugging, error fixing, troubleshooting
- optimize: Performance optimization, efficiency improvements
- generic: Any other development task, custom projects, unique requirements

Return ONLY the scenario name (e.g., "react", "python", "fastapi", etc.)
If the user's request doesn't fit the predefined scenarios well, return "generic".
If multiple scenarios apply, return the most specific one."#
    )
}

/// Compose the final system prompt for a scenario and query.
fn compose_prompt(scenario: Scenario, query: &str) -> String {
    let mut prompt = BASE_PROMPT.to_string();

    match scenario.augmentation() {
        Some(augmentation) => {
            prompt.push_str("\n\n");
            prompt.push_str(augmentation);
        }
        None => {
            prompt.push_str("\n\n");
            prompt.push_str(GENERIC_GUIDANCE);
        }
    }

    if let Some((title, example)) = scenario.quick_example(query) {
        prompt.push_str(&format!("\n\n{}:\n{}", title, example));
    }

    prompt
}
