//! `list_models`: models with field counts

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{count_of, get_or};
use crate::connection::{Domain, OdooConnection, ReadOptions};
use crate::core::BoostResult;
use crate::mcp::ServerContext;
use crate::tools::tool::{parse_params, schema_of, Tool};

fn default_limit() -> u32 {
    200
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListModelsParams {
    /// Optional substring filter on model technical name
    #[serde(default)]
    pub filter_name: String,

    /// Optional module name filter (models belonging to a module)
    #[serde(default)]
    pub filter_module: String,

    /// Maximum number of models to return (default 200)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Ids of the `ir.model` records registered by `module`
///
/// Goes through `ir.model.data` since `ir.model.modules` is not stored on
/// every supported version.
pub(crate) async fn module_model_ids(
    conn: &dyn OdooConnection,
    module: &str,
) -> BoostResult<Vec<Value>> {
    let data = conn
        .search_read(
            "ir.model.data",
            &Domain::new()
                .with("module", "=", module)
                .with("model", "=", "ir.model"),
            &ReadOptions::new().fields(["res_id"]),
        )
        .await?;
    Ok(data
        .iter()
        .filter_map(|d| d.get("res_id").cloned())
        .collect())
}

pub async fn list_models(conn: &dyn OdooConnection, params: ListModelsParams) -> BoostResult<Value> {
    let mut domain = Domain::new();
    if !params.filter_name.is_empty() {
        domain = domain.with("model", "ilike", params.filter_name.as_str());
    }

    if !params.filter_module.is_empty() {
        let ids = module_model_ids(conn, &params.filter_module).await?;
        if ids.is_empty() {
            return Ok(json!({"total": 0, "models": []}));
        }
        domain = domain.with("id", "in", ids);
    }

    let models = conn
        .search_read(
            "ir.model",
            &domain,
            &ReadOptions::new()
                .fields(["model", "name", "info", "field_id"])
                .limit(u64::from(params.limit))
                .order("model"),
        )
        .await?;

    let models: Vec<Value> = models
        .iter()
        .map(|m| {
            json!({
                "model": get_or(m, "model", Value::Null),
                "name": get_or(m, "name", Value::Null),
                "field_count": count_of(m, "field_id"),
            })
        })
        .collect();

    Ok(json!({
        "total": models.len(),
        "models": models,
    }))
}

pub struct ListModels;

#[async_trait]
impl Tool for ListModels {
    fn name(&self) -> &str {
        "list_models"
    }

    fn description(&self) -> &str {
        "List available Odoo models with field counts."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<ListModelsParams>()
    }

    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value> {
        list_models(ctx.connection(), parse_params(input)?).await
    }
}
