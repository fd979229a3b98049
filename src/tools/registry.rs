//! Tool registry
//!
//! Holds the tools served by the MCP server, keyed by name and listed in
//! registration order.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::tool::{Tool, ToolDefinition};
use crate::core::{BoostError, BoostResult};
use crate::mcp::ServerContext;

/// Registry that holds all available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool; a later tool with the same name replaces the earlier one
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        tracing::debug!("[ToolRegistry] Registering tool '{}'", name);
        if self.tools.insert(name.clone(), Arc::new(tool)).is_none() {
            self.order.push(name);
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Definitions of all tools, in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.definition())
            .collect()
    }

    /// Execute a tool by name
    pub async fn execute(
        &self,
        ctx: &ServerContext,
        name: &str,
        input: &Value,
    ) -> BoostResult<Value> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| BoostError::NotFound(format!("tool '{}'", name)))?;

        tracing::info!("[ToolRegistry] Executing tool: {}", name);
        tracing::debug!("[ToolRegistry] Input: {}", input);

        let result = tool.execute(ctx, input).await;
        if let Err(e) = &result {
            tracing::warn!("[ToolRegistry] Tool {} failed: {}", name, e);
        }
        result
    }

    /// Get the list of tool names, in registration order
    pub fn tool_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
