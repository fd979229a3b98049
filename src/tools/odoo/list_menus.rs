//! `list_menus`: the `ir.ui.menu` hierarchy

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{count_of, falsy_to_null, get_or, relation_label, text};
use crate::connection::{Domain, OdooConnection, ReadOptions};
use crate::core::BoostResult;
use crate::mcp::ServerContext;
use crate::tools::tool::{parse_params, schema_of, Tool};

fn default_limit() -> u32 {
    200
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListMenusParams {
    /// Filter by parent menu ID. 0 = root menus only. -1 = all menus.
    #[serde(default)]
    pub parent_id: i64,

    /// Maximum number of menus to return (default 200)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub async fn list_menus(conn: &dyn OdooConnection, params: ListMenusParams) -> BoostResult<Value> {
    let domain = match params.parent_id {
        0 => Domain::new().with("parent_id", "=", false),
        id if id > 0 => Domain::new().with("parent_id", "=", id),
        _ => Domain::new(),
    };

    let menus = conn
        .search_read(
            "ir.ui.menu",
            &domain,
            &ReadOptions::new()
                .fields(["name", "parent_id", "action", "sequence", "child_id", "complete_name"])
                .limit(u64::from(params.limit))
                .order("sequence, id"),
        )
        .await?;

    let menus: Vec<Value> = menus
        .iter()
        .map(|m| {
            json!({
                "id": get_or(m, "id", Value::Null),
                "name": get_or(m, "name", Value::Null),
                "complete_name": text(m, "complete_name"),
                "parent_id": relation_label(m.get("parent_id")),
                "action": falsy_to_null(m.get("action")),
                "sequence": get_or(m, "sequence", json!(10)),
                "child_count": count_of(m, "child_id"),
            })
        })
        .collect();

    Ok(json!({
        "total": menus.len(),
        "menus": menus,
    }))
}

pub struct ListMenus;

#[async_trait]
impl Tool for ListMenus {
    fn name(&self) -> &str {
        "list_menus"
    }

    fn description(&self) -> &str {
        "List Odoo menu items (ir.ui.menu). parent_id: 0 = root menus, -1 = all menus."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<ListMenusParams>()
    }

    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value> {
        list_menus(ctx.connection(), parse_params(input)?).await
    }
}
