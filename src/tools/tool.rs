//! Tool trait definition
//!
//! Every MCP tool implements this trait. Parameters arrive as the JSON
//! object sent by the client and the result is a JSON record.

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::core::{BoostError, BoostResult};
use crate::mcp::ServerContext;

/// Name, description and input schema advertised to MCP clients
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Map<String, Value>,
}

/// A stateless operation against the connected Odoo instance
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name of this tool, as called by clients
    fn name(&self) -> &str;

    /// Description shown to the agent
    fn description(&self) -> &str;

    /// JSON schema of the accepted arguments
    fn input_schema(&self) -> Map<String, Value>;

    /// Run the tool
    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value>;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Input schema of a parameter struct, as a JSON object
pub fn schema_of<P: JsonSchema>() -> Map<String, Value> {
    match serde_json::to_value(schemars::schema_for!(P)) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Deserialize tool arguments; a missing argument object means "all defaults"
pub fn parse_params<P: DeserializeOwned>(input: &Value) -> BoostResult<P> {
    let input = match input {
        Value::Null => Value::Object(Map::new()),
        other => other.clone(),
    };
    serde_json::from_value(input)
        .map_err(|e| BoostError::invalid_argument(format!("Invalid parameters: {}", e)))
}
