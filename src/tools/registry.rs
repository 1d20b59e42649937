//! Tool registry: the fixed name → capability mapping.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::tools::builtin;
use crate::tools::tool::Tool;

/// Read-only mapping from tool name to capability.
///
/// Constructed once at startup and shared by reference; there is no dynamic
/// registration after initialization. Uses a `BTreeMap` so listings come out
/// in a stable order.
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Create a registry with the five builtin tools.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(builtin::RunCommandTool::new()));
        registry.register(Arc::new(builtin::ReadFileTool::new()));
        registry.register(Arc::new(builtin::WriteFileTool::new()));
        registry.register(Arc::new(builtin::OpenBrowserTool::new()));
        registry.register(Arc::new(builtin::RunProjectTool::new()));
        registry
    }

    /// Register a tool under its own name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// All registered names, in stable order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// (name, description) pairs for listings.
    pub fn descriptions(&self) -> Vec<(&str, &str)> {
        self.tools
            .values()
            .map(|t| (t.name(), t.description()))
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_names() {
        let registry = ToolRegistry::builtin();
        assert_eq!(
            registry.names(),
            vec![
                "open_browser",
                "read_file",
                "run_command",
                "run_project",
                "write_file"
            ]
        );
    }

    #[test]
    fn test_lookup() {
        let registry = ToolRegistry::builtin();
        assert!(registry.get("run_command").is_some());
        assert!(registry.get("no_such_tool").is_none());
    }

    #[test]
    fn test_descriptions_nonempty() {
        let registry = ToolRegistry::builtin();
        for (name, description) in registry.descriptions() {
            assert!(!name.is_empty());
            assert!(!description.is_empty());
        }
    }
}
