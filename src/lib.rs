//! devflow - an agentic development assistant.
//!
//! Plans and executes development tasks one step at a time: an oracle emits
//! structured steps (ANALYZE through OUTPUT), the controller dispatches ACTION
//! steps through a fixed tool registry behind a command validator, and long
//! transcripts are periodically compacted by a summarizer.

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod safety;
pub mod tools;
