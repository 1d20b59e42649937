//! Core step-loop logic.
//!
//! The controller drives the ANALYZE → THINK → ACTION → RESULT → OBSERVE →
//! OUTPUT protocol turn by turn:
//! - one oracle call per iteration, parsed into a [`Step`]
//! - ACTION steps dispatched through the tool layer
//! - periodic history summarization to bound token growth
//! - termination on OUTPUT, parse failure, or step budget exhaustion

mod agent_loop;
mod step;
mod summarizer;

pub use agent_loop::{Agent, QueryOutcome, MAX_STEPS, SUMMARIZE_EVERY};
pub use step::{parse_step, Phase, Step, StepInput};
pub use summarizer::Summarizer;
