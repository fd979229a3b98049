//! `get_config`: system parameters from `ir.config_parameter`

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{get_or, text};
use crate::connection::{Domain, OdooConnection, ReadOptions};
use crate::core::BoostResult;
use crate::mcp::ServerContext;
use crate::tools::tool::{parse_params, schema_of, Tool};

fn default_limit() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetConfigParams {
    /// Exact key or substring filter. Empty returns all.
    #[serde(default)]
    pub key: String,

    /// Maximum number of parameters to return (default 100)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub async fn get_config(conn: &dyn OdooConnection, params: GetConfigParams) -> BoostResult<Value> {
    let mut domain = Domain::new();
    if !params.key.is_empty() {
        domain = domain.with("key", "ilike", params.key.as_str());
    }

    let rows = conn
        .search_read(
            "ir.config_parameter",
            &domain,
            &ReadOptions::new()
                .fields(["key", "value"])
                .limit(u64::from(params.limit))
                .order("key"),
        )
        .await?;

    let parameters: Vec<Value> = rows
        .iter()
        .map(|p| json!({"key": get_or(p, "key", Value::Null), "value": text(p, "value")}))
        .collect();

    Ok(json!({
        "total": parameters.len(),
        "parameters": parameters,
    }))
}

pub struct GetConfig;

#[async_trait]
impl Tool for GetConfig {
    fn name(&self) -> &str {
        "get_config"
    }

    fn description(&self) -> &str {
        "Get Odoo system configuration parameters (ir.config_parameter)."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<GetConfigParams>()
    }

    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value> {
        get_config(ctx.connection(), parse_params(input)?).await
    }
}
