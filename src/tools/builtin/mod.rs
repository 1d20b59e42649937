//! Builtin tools: the five fixed capabilities of the loop.

mod browser;
mod file;
mod project;
mod shell;

pub use browser::OpenBrowserTool;
pub use file::{ReadFileTool, WriteFileTool};
pub use project::RunProjectTool;
pub use shell::RunCommandTool;
