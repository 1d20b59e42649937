//! Tool system.
//!
//! Tools are the loop's interface to the outside world: process execution,
//! filesystem access, browser launch, project running. The registry is fixed
//! at startup; the dispatcher mediates between untrusted oracle output and
//! tool invocation, converting every failure to result text.

pub mod builtin;

mod dispatcher;
mod registry;
mod tool;

pub use dispatcher::ToolDispatcher;
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolInput};
