//! Step model and oracle response parsing.
//!
//! Every oracle turn produces exactly one [`Step`]: a narrative phase, an
//! optional tool name, an input payload, and free-text notes. Steps are
//! immutable once parsed; the next oracle turn supersedes them.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::StepParseError;

/// Matches the largest brace-delimited substring, across newlines.
static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// Narrative phase of a step.
///
/// Only `Action`, `Output`, and `Summary` change controller behavior; the
/// rest are recorded and passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Analyze,
    Think,
    Action,
    Result,
    Observe,
    Output,
    Summary,
}

impl Phase {
    /// Parse a phase tag, case-insensitively. Unknown tags yield `None`;
    /// the loop treats such steps as inert rather than failing.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_uppercase().as_str() {
            "ANALYZE" => Some(Phase::Analyze),
            "THINK" => Some(Phase::Think),
            "ACTION" => Some(Phase::Action),
            "RESULT" => Some(Phase::Result),
            "OBSERVE" => Some(Phase::Observe),
            "OUTPUT" => Some(Phase::Output),
            "SUMMARY" => Some(Phase::Summary),
            _ => None,
        }
    }

    /// Canonical upper-case tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Analyze => "ANALYZE",
            Phase::Think => "THINK",
            Phase::Action => "ACTION",
            Phase::Result => "RESULT",
            Phase::Observe => "OBSERVE",
            Phase::Output => "OUTPUT",
            Phase::Summary => "SUMMARY",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input payload for a tool invocation.
///
/// The oracle may send a bare string, a parameter mapping, or any other JSON
/// value; dispatch adapts each shape explicitly instead of inspecting types
/// at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum StepInput {
    /// A single string argument (e.g. a shell command).
    Text(String),
    /// Named parameters (e.g. `{"filename": ..., "content": ...}`).
    Named(serde_json::Map<String, Value>),
    /// Any other JSON value, passed through as-is.
    Raw(Value),
}

impl StepInput {
    /// Classify a JSON value into its input shape.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => StepInput::Text(s),
            Value::Object(map) => StepInput::Named(map),
            other => StepInput::Raw(other),
        }
    }

    /// The text payload, if this is a string input.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StepInput::Text(s) => Some(s),
            _ => None,
        }
    }

    /// A named parameter, if this is a mapping input.
    pub fn param(&self, name: &str) -> Option<&Value> {
        match self {
            StepInput::Named(map) => map.get(name),
            _ => None,
        }
    }

    /// A named string parameter.
    pub fn str_param(&self, name: &str) -> Option<&str> {
        self.param(name).and_then(Value::as_str)
    }
}

impl fmt::Display for StepInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepInput::Text(s) => f.write_str(s),
            StepInput::Named(map) => {
                let rendered =
                    serde_json::to_string(map).unwrap_or_else(|_| "{}".to_string());
                f.write_str(&rendered)
            }
            StepInput::Raw(value) => {
                let rendered =
                    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
                f.write_str(&rendered)
            }
        }
    }
}

/// One decision emitted by the oracle.
#[derive(Debug, Clone)]
pub struct Step {
    /// Narrative phase, `None` when the tag is missing or unrecognized.
    pub phase: Option<Phase>,
    /// Tool to invoke; meaningful only for ACTION and SUMMARY steps.
    pub tool: Option<String>,
    /// Payload for the tool.
    pub input: StepInput,
    /// Free-text rationale or notes.
    pub content: String,
}

impl Step {
    /// Build a step from a parsed JSON object.
    ///
    /// Missing fields default the same way the wire contract does: empty
    /// tool, empty string input, empty content.
    pub fn from_json(value: &Value) -> Self {
        let phase = value
            .get("step")
            .and_then(Value::as_str)
            .and_then(Phase::parse);

        let tool = value
            .get("tool")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let input = value
            .get("input")
            .cloned()
            .map(StepInput::from_value)
            .unwrap_or_else(|| StepInput::Text(String::new()));

        let content = value
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            phase,
            tool,
            input,
            content,
        }
    }

    /// Serialize back to the wire shape (used when a summarized step is
    /// appended to the transcript as an assistant message).
    pub fn to_wire_json(&self) -> String {
        let value = serde_json::json!({
            "step": self.phase.map(|p| p.as_str()).unwrap_or(""),
            "tool": self.tool.clone().unwrap_or_default(),
            "input": match &self.input {
                StepInput::Text(s) => Value::String(s.clone()),
                StepInput::Named(map) => Value::Object(map.clone()),
                StepInput::Raw(v) => v.clone(),
            },
            "content": self.content,
        });
        value.to_string()
    }
}

/// Parse raw oracle output into a [`Step`].
///
/// First extracts the largest brace-delimited substring and parses it as
/// JSON; if no braces are present, parses the entire text. Any JSON failure
/// is fatal for the current query and carries the offending text.
pub fn parse_step(text: &str) -> Result<Step, StepParseError> {
    let candidate = JSON_OBJECT
        .find(text)
        .map(|m| m.as_str())
        .unwrap_or(text);

    let value: Value = serde_json::from_str(candidate).map_err(|e| StepParseError {
        reason: e.to_string(),
        text: text.to_string(),
    })?;

    Ok(Step::from_json(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_phase_parse_case_insensitive() {
        assert_eq!(Phase::parse("action"), Some(Phase::Action));
        assert_eq!(Phase::parse("Output"), Some(Phase::Output));
        assert_eq!(Phase::parse("SUMMARY"), Some(Phase::Summary));
        assert_eq!(Phase::parse("  think "), Some(Phase::Think));
        assert_eq!(Phase::parse("bogus"), None);
        assert_eq!(Phase::parse(""), None);
    }

    #[test]
    fn test_parse_action_step_round_trip() {
        let raw = r#"{"step":"ACTION","tool":"write_file","input":{"filename":"x.txt","content":"y"},"content":"note"}"#;
        let step = parse_step(raw).unwrap();

        assert_eq!(step.phase, Some(Phase::Action));
        assert_eq!(step.tool.as_deref(), Some("write_file"));
        assert_eq!(step.content, "note");

        match &step.input {
            StepInput::Named(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("filename").unwrap(), "x.txt");
                assert_eq!(map.get("content").unwrap(), "y");
            }
            other => panic!("expected named input, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_extracts_json_from_prose() {
        let raw = "Here is my decision:\n{\"step\":\"think\",\"tool\":\"\",\"input\":\"\",\"content\":\"planning\"}\nDone.";
        let step = parse_step(raw).unwrap();
        assert_eq!(step.phase, Some(Phase::Think));
        assert!(step.tool.is_none());
        assert_eq!(step.content, "planning");
    }

    #[test]
    fn test_parse_whole_text_without_braces_fails() {
        let err = parse_step("no json here").unwrap_err();
        assert!(err.text.contains("no json here"));
    }

    #[test]
    fn test_parse_failure_preserves_offending_text() {
        let err = parse_step("{not valid json}").unwrap_err();
        assert_eq!(err.text, "{not valid json}");
        assert!(!err.reason.is_empty());
    }

    #[test]
    fn test_unknown_phase_is_inert_not_fatal() {
        let step =
            parse_step(r#"{"step":"PONDER","tool":"","input":"","content":"hmm"}"#).unwrap();
        assert_eq!(step.phase, None);
        assert_eq!(step.content, "hmm");
    }

    #[test]
    fn test_missing_fields_default() {
        let step = parse_step(r#"{"step":"OUTPUT"}"#).unwrap();
        assert_eq!(step.phase, Some(Phase::Output));
        assert!(step.tool.is_none());
        assert_eq!(step.input, StepInput::Text(String::new()));
        assert_eq!(step.content, "");
    }

    #[test]
    fn test_input_shapes() {
        assert_eq!(
            StepInput::from_value(serde_json::json!("ls")),
            StepInput::Text("ls".to_string())
        );
        assert!(matches!(
            StepInput::from_value(serde_json::json!({"a": 1})),
            StepInput::Named(_)
        ));
        assert!(matches!(
            StepInput::from_value(serde_json::json!(42)),
            StepInput::Raw(_)
        ));
    }

    #[test]
    fn test_input_display() {
        assert_eq!(StepInput::Text("echo hi".to_string()).to_string(), "echo hi");
        let named = StepInput::from_value(serde_json::json!({"url": "http://x"}));
        assert_eq!(named.to_string(), r#"{"url":"http://x"}"#);
    }

    #[test]
    fn test_wire_json_round_trip() {
        let step = Step {
            phase: Some(Phase::Summary),
            tool: Some("run_command".to_string()),
            input: StepInput::Text("mkdir demo".to_string()),
            content: "create project dir".to_string(),
        };

        let reparsed = parse_step(&step.to_wire_json()).unwrap();
        assert_eq!(reparsed.phase, Some(Phase::Summary));
        assert_eq!(reparsed.tool.as_deref(), Some("run_command"));
        assert_eq!(reparsed.input, StepInput::Text("mkdir demo".to_string()));
    }
}
