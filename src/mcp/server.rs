//! MCP server handler
//!
//! Advertises the registry's tools and routes `tools/call` requests to them.
//! Tool results are returned as pretty-printed JSON text.

use std::sync::Arc;

use rmcp::{
    model::*,
    service::{RequestContext, RoleServer},
    ErrorData as McpError, ServerHandler,
};
use serde_json::{Map, Value};

use super::ServerContext;
use crate::core::BoostError;
use crate::tools::{ToolDefinition, ToolRegistry};

const INSTRUCTIONS: &str = "Odoo Boost MCP server – provides deep introspection into a running \
    Odoo instance. Use these tools to explore models, views, records, configuration, access \
    rights, and more.";

/// MCP server exposing the Odoo tools of a registry
#[derive(Clone)]
pub struct OdooBoostServer {
    ctx: Arc<ServerContext>,
    registry: Arc<ToolRegistry>,
}

impl std::fmt::Debug for OdooBoostServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdooBoostServer")
            .field("tools", &self.registry.len())
            .finish_non_exhaustive()
    }
}

fn to_mcp_tool(def: ToolDefinition) -> Tool {
    Tool {
        name: def.name.into(),
        title: None,
        description: Some(def.description.into()),
        input_schema: Arc::new(def.input_schema),
        output_schema: None,
        annotations: None,
        icons: None,
        meta: None,
    }
}

impl OdooBoostServer {
    pub fn new(ctx: ServerContext, registry: ToolRegistry) -> Self {
        Self {
            ctx: Arc::new(ctx),
            registry: Arc::new(registry),
        }
    }

    /// Tools advertised to clients, in registration order
    pub fn tools(&self) -> Vec<Tool> {
        self.registry
            .definitions()
            .into_iter()
            .map(to_mcp_tool)
            .collect()
    }

    /// Run a tool and wrap its outcome for the client
    ///
    /// Bad arguments and unknown tools are protocol errors; failures while
    /// talking to Odoo come back as an error result the agent can read.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<CallToolResult, McpError> {
        let input = Value::Object(arguments.unwrap_or_default());

        match self.registry.execute(&self.ctx, name, &input).await {
            Ok(value) => {
                let text = serde_json::to_string_pretty(&value).map_err(|e| {
                    McpError::internal_error(format!("Failed to encode result: {}", e), None)
                })?;
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(BoostError::NotFound(_)) if self.registry.get(name).is_none() => Err(
                McpError::invalid_params(format!("Unknown tool: {}", name), None),
            ),
            Err(BoostError::InvalidArgument(msg)) => Err(McpError::invalid_params(msg, None)),
            Err(e) => {
                tracing::error!("[McpServer] Tool {} failed: {}", name, e);
                Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
            }
        }
    }
}

impl ServerHandler for OdooBoostServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.into()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(request.name.as_ref(), request.arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::memory::MemoryConnection;
    use crate::tools::default_registry;
    use crate::tools::odoo::test_support::{connection, server_context};
    use serde_json::json;

    fn server(conn: MemoryConnection) -> OdooBoostServer {
        OdooBoostServer::new(server_context(conn), default_registry())
    }

    fn text_of(result: &CallToolResult) -> String {
        result.content[0]
            .as_text()
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    fn args(value: Value) -> Option<Map<String, Value>> {
        value.as_object().cloned()
    }

    #[test]
    fn test_info_enables_tools() {
        let info = server(connection()).get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("Odoo Boost MCP server"));
    }

    #[test]
    fn test_advertises_all_tools() {
        let tools = server(connection()).tools();
        assert_eq!(tools.len(), 15);
        assert_eq!(tools[0].name, "application_info");
        assert!(tools.iter().all(|t| t.description.is_some()));
    }

    #[tokio::test]
    async fn test_success_is_pretty_json() {
        let result = server(connection())
            .dispatch("get_config", args(json!({"key": "database"})))
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));

        let text = text_of(&result);
        assert!(text.contains('\n'));
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["parameters"][0]["value"], "test-uuid-1234");
    }

    #[tokio::test]
    async fn test_missing_arguments_use_defaults() {
        let result = server(connection()).dispatch("search_docs", None).await.unwrap();
        let value: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert!(value["available_topics"].is_array());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let err = server(connection()).dispatch("drop_database", None).await.unwrap_err();
        assert!(err.message.contains("Unknown tool: drop_database"));
    }

    #[tokio::test]
    async fn test_bad_arguments_are_invalid_params() {
        let err = server(connection())
            .dispatch("database_schema", args(json!({"model_name": 42})))
            .await
            .unwrap_err();
        assert!(err.message.contains("Invalid parameters"));
    }

    #[tokio::test]
    async fn test_odoo_failure_is_error_result() {
        let result = server(connection())
            .dispatch("execute_method", args(json!({"model": "no.such", "method": "read"})))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("no.such"));
    }
}
