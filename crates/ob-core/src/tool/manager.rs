//! Tool manager for registering and executing tools

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::llm::ToolDefinition;
use crate::tool::{Tool, ToolResult};
use crate::Result;

/// Manager for registered tools
///
/// Tools are kept ordered by name so the definitions sent to the model are
/// stable across requests.
pub struct ToolManager {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolManager {
    /// Create a new empty tool manager
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool
    ///
    /// If a tool with the same name already exists, it will be replaced.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Get all registered tool definitions for Claude API
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.input_schema()))
            .collect()
    }

    /// Execute a tool by name
    ///
    /// # Errors
    /// Returns an error if the tool is not found or execution fails
    pub async fn execute(&self, name: &str, input: JsonValue) -> Result<ToolResult> {
        let tool = self.get(name).ok_or_else(|| {
            crate::Error::ToolExecution(format!("Unknown tool: {}", name))
        })?;
        tool.execute(input).await
    }

    /// Check if a tool is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if no tools are registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all registered tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoTool(&'static str);

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "Echo the input back"
        }

        fn input_schema(&self) -> JsonValue {
            json!({"type": "object", "properties": {}})
        }

        async fn execute(&self, input: JsonValue) -> Result<ToolResult> {
            Ok(ToolResult::success(input.to_string()))
        }
    }

    #[tokio::test]
    async fn test_register_and_execute() {
        let mut manager = ToolManager::new();
        manager.register(Arc::new(EchoTool("echo")));

        assert!(manager.contains("echo"));
        let result = manager.execute("echo", json!({"a": 1})).await.unwrap();
        assert_eq!(result, ToolResult::success(r#"{"a":1}"#));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let manager = ToolManager::new();
        let err = manager.execute("missing", json!({})).await.unwrap_err();
        assert!(err.to_string().contains("Unknown tool: missing"));
    }

    #[test]
    fn test_definitions_sorted_and_replaced() {
        let mut manager = ToolManager::new();
        manager.register(Arc::new(EchoTool("zeta")));
        manager.register(Arc::new(EchoTool("alpha")));
        manager.register(Arc::new(EchoTool("alpha")));

        assert_eq!(manager.len(), 2);
        assert_eq!(manager.tool_names(), vec!["alpha", "zeta"]);
        let names: Vec<_> = manager.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
