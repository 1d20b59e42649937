//! Advisory safety checks for shell commands.
//!
//! The validator is a heuristic gate that rejects obviously destructive or
//! runaway commands before dispatch. It is not a sandbox and must never be
//! relied on as a security boundary.

mod validator;

pub use validator::{CommandValidator, Verdict};
