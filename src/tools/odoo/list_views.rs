//! `list_views`: `ir.ui.view` records with their arch

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{get_or, relation_label, text};
use crate::connection::{Domain, OdooConnection, ReadOptions};
use crate::core::BoostResult;
use crate::mcp::ServerContext;
use crate::tools::tool::{parse_params, schema_of, Tool};

fn default_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListViewsParams {
    /// Filter by model technical name (e.g. 'res.partner')
    #[serde(default)]
    pub model_name: String,

    /// Filter by view type (e.g. 'form', 'list', 'kanban', 'search')
    #[serde(default)]
    pub view_type: String,

    /// Maximum number of views to return (default 50)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub async fn list_views(conn: &dyn OdooConnection, params: ListViewsParams) -> BoostResult<Value> {
    let mut domain = Domain::new();
    if !params.model_name.is_empty() {
        domain = domain.with("model", "=", params.model_name.as_str());
    }
    if !params.view_type.is_empty() {
        domain = domain.with("type", "=", params.view_type.as_str());
    }

    let views = conn
        .search_read(
            "ir.ui.view",
            &domain,
            &ReadOptions::new()
                .fields(["name", "model", "type", "arch", "inherit_id", "priority", "active"])
                .limit(u64::from(params.limit))
                .order("model, priority"),
        )
        .await?;

    let views: Vec<Value> = views
        .iter()
        .map(|v| {
            json!({
                "id": get_or(v, "id", Value::Null),
                "name": get_or(v, "name", Value::Null),
                "model": get_or(v, "model", Value::Null),
                "type": get_or(v, "type", Value::Null),
                "priority": get_or(v, "priority", json!(16)),
                "inherit_id": relation_label(v.get("inherit_id")),
                "active": get_or(v, "active", json!(true)),
                "arch": text(v, "arch"),
            })
        })
        .collect();

    Ok(json!({
        "total": views.len(),
        "views": views,
    }))
}

pub struct ListViews;

#[async_trait]
impl Tool for ListViews {
    fn name(&self) -> &str {
        "list_views"
    }

    fn description(&self) -> &str {
        "List Odoo views (ir.ui.view), optionally filtered by model or type."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<ListViewsParams>()
    }

    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value> {
        list_views(ctx.connection(), parse_params(input)?).await
    }
}
