//! `get_module_info`: module metadata, dependencies and the models it defines

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::list_models::module_model_ids;
use super::{error_record, get_or, relation_label, text};
use crate::connection::{Domain, OdooConnection, ReadOptions};
use crate::core::BoostResult;
use crate::mcp::ServerContext;
use crate::tools::tool::{parse_params, schema_of, Tool};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetModuleInfoParams {
    /// Technical module name, e.g. 'sale' or 'account'
    pub module_name: String,
}

pub async fn get_module_info(
    conn: &dyn OdooConnection,
    params: GetModuleInfoParams,
) -> BoostResult<Value> {
    let name = params.module_name.as_str();

    let modules = conn
        .search_read(
            "ir.module.module",
            &Domain::new().with("name", "=", name),
            &ReadOptions::new()
                .fields([
                    "name",
                    "shortdesc",
                    "summary",
                    "description",
                    "author",
                    "website",
                    "installed_version",
                    "state",
                    "category_id",
                    "license",
                    "application",
                ])
                .limit(1),
        )
        .await?;
    let Some(module) = modules.first() else {
        return Ok(error_record(format!("Module '{}' not found.", name)));
    };

    let deps = conn
        .search_read(
            "ir.module.module.dependency",
            &Domain::new().with("module_id.name", "=", name),
            &ReadOptions::new().fields(["name", "auto_install_required"]),
        )
        .await?;

    let model_ids = module_model_ids(conn, name).await?;
    let models = if model_ids.is_empty() {
        Vec::new()
    } else {
        conn.search_read(
            "ir.model",
            &Domain::new().with("id", "in", model_ids),
            &ReadOptions::new().fields(["model", "name"]).order("model"),
        )
        .await?
    };

    Ok(json!({
        "name": get_or(module, "name", json!(name)),
        "title": text(module, "shortdesc"),
        "summary": text(module, "summary"),
        "author": text(module, "author"),
        "website": text(module, "website"),
        "version": text(module, "installed_version"),
        "state": text(module, "state"),
        "category": relation_label(module.get("category_id")),
        "license": text(module, "license"),
        "application": get_or(module, "application", json!(false)),
        "dependencies": deps
            .iter()
            .map(|d| json!({
                "name": get_or(d, "name", Value::Null),
                "auto_install_required": get_or(d, "auto_install_required", json!(false)),
            }))
            .collect::<Vec<_>>(),
        "models": models
            .iter()
            .map(|m| json!({
                "model": get_or(m, "model", Value::Null),
                "name": get_or(m, "name", Value::Null),
            }))
            .collect::<Vec<_>>(),
    }))
}

pub struct GetModuleInfo;

#[async_trait]
impl Tool for GetModuleInfo {
    fn name(&self) -> &str {
        "get_module_info"
    }

    fn description(&self) -> &str {
        "Get detailed information about an Odoo module including dependencies and models."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<GetModuleInfoParams>()
    }

    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value> {
        get_module_info(ctx.connection(), parse_params(input)?).await
    }
}
