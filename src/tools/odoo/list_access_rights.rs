//! `list_access_rights`: ACLs (`ir.model.access`) and record rules (`ir.rule`)

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
    100
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListAccessRightsParams {
    /// Filter by model technical name (e.g. 'res.partner')
    #[serde(default)]
    pub model_name: String,

    /// Maximum number of entries to return per type (default 100)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub async fn list_access_rights(
    conn: &dyn OdooConnection,
    params: ListAccessRightsParams,
) -> BoostResult<Value> {
    let mut domain = Domain::new();
    if !params.model_name.is_empty() {
        domain = domain.with("model_id.model", "=", params.model_name.as_str());
    }
    let limit = u64::from(params.limit);

    let acls = conn
        .search_read(
            "ir.model.access",
            &domain,
            &ReadOptions::new()
                .fields([
                    "name",
                    "model_id",
                    "group_id",
                    "perm_read",
                    "perm_write",
                    "perm_create",
                    "perm_unlink",
                ])
                .limit(limit)
                .order("model_id, name"),
        )
        .await?;

    let rules = conn
        .search_read(
            "ir.rule",
            &domain,
            &ReadOptions::new()
                .fields([
                    "name",
                    "model_id",
                    "groups",
                    "domain_force",
                    "perm_read",
                    "perm_write",
                    "perm_create",
                    "perm_unlink",
                    "global",
                ])
                .limit(limit)
                .order("model_id, name"),
        )
        .await?;

    let access_rights: Vec<Value> = acls
        .iter()
        .map(|a| {
            json!({
                "name": get_or(a, "name", Value::Null),
                "model": relation_label(a.get("model_id")),
                "group": relation_label(a.get("group_id")),
                "read": get_or(a, "perm_read", json!(false)),
                "write": get_or(a, "perm_write", json!(false)),
                "create": get_or(a, "perm_create", json!(false)),
                "unlink": get_or(a, "perm_unlink", json!(false)),
            })
        })
        .collect();

    let record_rules: Vec<Value> = rules
        .iter()
        .map(|r| {
            json!({
                "name": get_or(r, "name", Value::Null),
                "model": relation_label(r.get("model_id")),
                "domain": text(r, "domain_force"),
                "global": get_or(r, "global", json!(false)),
                "read": get_or(r, "perm_read", json!(false)),
                "write": get_or(r, "perm_write", json!(false)),
                "create": get_or(r, "perm_create", json!(false)),
                "unlink": get_or(r, "perm_unlink", json!(false)),
            })
        })
        .collect();

    let model_filter = if params.model_name.is_empty() {
        "(all)".to_string()
    } else {
        params.model_name
    };

    Ok(json!({
        "model_filter": model_filter,
        "access_rights": access_rights,
        "record_rules": record_rules,
    }))
}

pub struct ListAccessRights;

#[async_trait]
impl Tool for ListAccessRights {
    fn name(&self) -> &str {
        "list_access_rights"
    }

    fn description(&self) -> &str {
        "List access rights (ir.model.access) and record rules (ir.rule) for a model."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<ListAccessRightsParams>()
    }

    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value> {
        list_access_rights(ctx.connection(), parse_params(input)?).await
    }
}
