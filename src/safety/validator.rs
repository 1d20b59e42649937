//! Command validation before shell dispatch.

use crate::agent::StepInput;

/// Maximum number of `&&` chaining tokens before a command is rejected.
const MAX_CHAIN_TOKENS: usize = 2;

/// Maximum command length in characters.
const MAX_COMMAND_LENGTH: usize = 200;

/// Substrings that mark a command as destructive. Matched case-insensitively.
const DANGEROUS_PATTERNS: &[&str] = &["rm -rf", "del /s /q", "format", "chmod 777"];

/// Result of validating a candidate command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(String),
}

impl Verdict {
    /// Whether the command was accepted.
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// Heuristic validator for shell-command-shaped inputs.
///
/// Pure predicate: no state, no side effects. Non-string inputs always pass;
/// the validator only inspects text that will be handed to a shell.
#[derive(Debug, Default)]
pub struct CommandValidator;

impl CommandValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a tool input. Only `Text` payloads are inspected.
    pub fn validate(&self, input: &StepInput) -> Verdict {
        match input.as_text() {
            Some(command) => self.validate_command(command),
            None => Verdict::Accept,
        }
    }

    /// Validate a candidate command string.
    pub fn validate_command(&self, command: &str) -> Verdict {
        let chain_count = command.matches("&&").count();
        if chain_count > MAX_CHAIN_TOKENS {
            return Verdict::Reject(format!(
                "complex command with {} '&&' operators (max {})",
                chain_count, MAX_CHAIN_TOKENS
            ));
        }

        let length = command.chars().count();
        if length > MAX_COMMAND_LENGTH {
            return Verdict::Reject(format!(
                "command too long ({} characters, max {})",
                length, MAX_COMMAND_LENGTH
            ));
        }

        let lowered = command.to_lowercase();
        for pattern in DANGEROUS_PATTERNS {
            if lowered.contains(pattern) {
                return Verdict::Reject(format!(
                    "potentially dangerous pattern: {}",
                    pattern
                ));
            }
        }

        Verdict::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> CommandValidator {
        CommandValidator::new()
    }

    #[test]
    fn test_accepts_simple_commands() {
        assert!(validator().validate_command("echo hello").is_accept());
        assert!(validator().validate_command("cargo build").is_accept());
        assert!(validator()
            .validate_command("mkdir demo && cd demo")
            .is_accept());
    }

    #[test]
    fn test_rejects_excessive_chaining() {
        let cmd = "a && b && c && d";
        assert!(!validator().validate_command(cmd).is_accept());

        // Exactly two operators is still fine.
        assert!(validator().validate_command("a && b && c").is_accept());
    }

    #[test]
    fn test_rejects_long_commands() {
        let cmd = "x".repeat(201);
        match validator().validate_command(&cmd) {
            Verdict::Reject(reason) => assert!(reason.contains("too long")),
            Verdict::Accept => panic!("long command should be rejected"),
        }

        assert!(validator().validate_command(&"x".repeat(200)).is_accept());
    }

    #[test]
    fn test_length_counted_in_characters_not_bytes() {
        // 150 characters but 300 bytes; still under the limit.
        let cmd = "é".repeat(150);
        assert!(validator().validate_command(&cmd).is_accept());

        assert!(validator().validate_command(&"é".repeat(200)).is_accept());
        assert!(!validator().validate_command(&"é".repeat(201)).is_accept());
    }

    #[test]
    fn test_rejects_dangerous_patterns_case_insensitive() {
        assert!(!validator().validate_command("rm -rf build").is_accept());
        assert!(!validator().validate_command("RM -RF build").is_accept());
        assert!(!validator().validate_command("del /s /q temp").is_accept());
        assert!(!validator().validate_command("format c:").is_accept());
        assert!(!validator().validate_command("chmod 777 /srv").is_accept());
    }

    #[test]
    fn test_first_matching_reason_reported() {
        // Chaining is checked before the deny list.
        let cmd = "rm -rf a && b && c && d";
        match validator().validate_command(cmd) {
            Verdict::Reject(reason) => assert!(reason.contains("&&")),
            Verdict::Accept => panic!("should be rejected"),
        }
    }

    #[test]
    fn test_non_text_inputs_always_accepted() {
        let named = StepInput::from_value(serde_json::json!({"command": "rm -rf /"}));
        assert!(validator().validate(&named).is_accept());

        let raw = StepInput::from_value(serde_json::json!(42));
        assert!(validator().validate(&raw).is_accept());
    }
}
