//! `execute_method`: call any public ORM method on a model

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{parse_args, parse_kwargs};
use crate::connection::OdooConnection;
use crate::core::BoostResult;
use crate::mcp::ServerContext;
use crate::tools::tool::{parse_params, schema_of, Tool};

fn default_args() -> String {
    "[]".to_string()
}

fn default_kwargs() -> String {
    "{}".to_string()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecuteMethodParams {
    /// Technical model name, e.g. 'res.partner'
    pub model: String,

    /// Method name, e.g. 'name_search', 'default_get', 'fields_get'
    pub method: String,

    /// Positional arguments as a JSON list, e.g. '[[1, 2, 3]]' for record IDs
    #[serde(default = "default_args")]
    pub args: String,

    /// Keyword arguments as a JSON object, e.g. '{"fields": ["name"]}'
    #[serde(default = "default_kwargs")]
    pub kwargs: String,
}

pub async fn execute_method(
    conn: &dyn OdooConnection,
    params: ExecuteMethodParams,
) -> BoostResult<Value> {
    let args = parse_args(&params.args)?;
    let kwargs = parse_kwargs(&params.kwargs)?;

    tracing::info!("[Tools] execute_method {}.{}", params.model, params.method);
    let result = conn.execute(&params.model, &params.method, args, kwargs).await?;

    Ok(json!({
        "model": params.model,
        "method": params.method,
        "result": result,
    }))
}

pub struct ExecuteMethod;

#[async_trait]
impl Tool for ExecuteMethod {
    fn name(&self) -> &str {
        "execute_method"
    }

    fn description(&self) -> &str {
        "Execute an arbitrary ORM method on an Odoo model. Use with care."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<ExecuteMethodParams>()
    }

    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value> {
        execute_method(ctx.connection(), parse_params(input)?).await
    }
}
