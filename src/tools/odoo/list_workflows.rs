//! `list_workflows`: automated actions and server actions

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{count_of, get_or, optional_model, text};
use crate::connection::{Domain, OdooConnection, ReadOptions};
use crate::core::BoostResult;
use crate::mcp::ServerContext;
use crate::tools::tool::{parse_params, schema_of, Tool};

/// Characters of server action code shown per action
const CODE_PREVIEW_CHARS: usize = 200;

fn default_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListWorkflowsParams {
    /// Filter by model technical name (e.g. 'sale.order')
    #[serde(default)]
    pub model_name: String,

    /// Maximum entries per type (default 50)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn code_preview(record: &crate::connection::Record) -> String {
    record
        .get("code")
        .and_then(Value::as_str)
        .map(|code| code.chars().take(CODE_PREVIEW_CHARS).collect())
        .unwrap_or_default()
}

pub async fn list_workflows(
    conn: &dyn OdooConnection,
    params: ListWorkflowsParams,
) -> BoostResult<Value> {
    let mut domain = Domain::new();
    if !params.model_name.is_empty() {
        domain = domain.with("model_name", "=", params.model_name.as_str());
    }
    let limit = u64::from(params.limit);

    let automations = optional_model(
        "base.automation",
        conn.search_read(
            "base.automation",
            &domain,
            &ReadOptions::new()
                .fields(["name", "model_name", "trigger", "active", "action_server_ids"])
                .limit(limit)
                .order("model_name, name"),
        )
        .await,
    )?;

    let actions = optional_model(
        "ir.actions.server",
        conn.search_read(
            "ir.actions.server",
            &domain,
            &ReadOptions::new()
                .fields(["name", "model_name", "state", "code", "sequence"])
                .limit(limit)
                .order("model_name, sequence, name"),
        )
        .await,
    )?;

    let automated_actions: Vec<Value> = automations
        .iter()
        .map(|a| {
            json!({
                "id": get_or(a, "id", Value::Null),
                "name": get_or(a, "name", Value::Null),
                "model": text(a, "model_name"),
                "trigger": text(a, "trigger"),
                "active": get_or(a, "active", json!(true)),
                "server_action_count": count_of(a, "action_server_ids"),
            })
        })
        .collect();

    let server_actions: Vec<Value> = actions
        .iter()
        .map(|a| {
            json!({
                "id": get_or(a, "id", Value::Null),
                "name": get_or(a, "name", Value::Null),
                "model": text(a, "model_name"),
                "type": text(a, "state"),
                "code_preview": code_preview(a),
                "sequence": get_or(a, "sequence", json!(5)),
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
        "automated_actions": automated_actions,
        "server_actions": server_actions,
    }))
}

pub struct ListWorkflows;

#[async_trait]
impl Tool for ListWorkflows {
    fn name(&self) -> &str {
        "list_workflows"
    }

    fn description(&self) -> &str {
        "List automated actions (base.automation) and server actions (ir.actions.server)."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<ListWorkflowsParams>()
    }

    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value> {
        list_workflows(ctx.connection(), parse_params(input)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::memory::MemoryConnection;
    use crate::tools::odoo::test_support::connection;

    fn params(input: Value) -> ListWorkflowsParams {
        parse_params(&input).unwrap()
    }

    #[tokio::test]
    async fn test_all_workflows() {
        let result = list_workflows(&connection(), params(json!({}))).await.unwrap();
        assert_eq!(result["model_filter"], "(all)");
        assert_eq!(
            result["automated_actions"][0],
            json!({
                "id": 1,
                "name": "Auto-assign partner",
                "model": "res.partner",
                "trigger": "on_create",
                "active": true,
                "server_action_count": 1
            })
        );
        assert_eq!(result["server_actions"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_code_preview_truncated() {
        let result = list_workflows(&connection(), params(json!({"model_name": "sale.order"})))
            .await
            .unwrap();
        assert!(result["automated_actions"].as_array().unwrap().is_empty());
        let action = &result["server_actions"][0];
        assert_eq!(action["name"], "Long action");
        assert_eq!(action["code_preview"].as_str().unwrap().len(), 200);
        assert_eq!(action["sequence"], 7);
    }

    #[tokio::test]
    async fn test_without_automation_module() {
        let conn = MemoryConnection::new()
            .seed("ir.actions.server", json!([]))
            .authenticated();
        let result = list_workflows(&conn, params(json!({}))).await.unwrap();
        assert_eq!(result["automated_actions"], json!([]));
        assert_eq!(result["server_actions"], json!([]));
    }
}
