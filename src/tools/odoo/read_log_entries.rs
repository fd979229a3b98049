//! `read_log_entries`: database log entries from `ir.logging`
//!
//! Odoo only writes there when `log_db` is set, so a failing read is
//! reported as a hint rather than an error.

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{error_record, get_or, text};
use crate::connection::{Domain, OdooConnection, ReadOptions};
use crate::core::BoostResult;
use crate::mcp::ServerContext;
use crate::tools::tool::{parse_params, schema_of, Tool};

fn default_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReadLogEntriesParams {
    /// Filter by log level (e.g. 'WARNING', 'ERROR', 'CRITICAL')
    #[serde(default)]
    pub level: String,

    /// Filter by function name substring
    #[serde(default)]
    pub func: String,

    /// Maximum entries to return (default 50)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub async fn read_log_entries(
    conn: &dyn OdooConnection,
    params: ReadLogEntriesParams,
) -> BoostResult<Value> {
    let mut domain = Domain::new();
    if !params.level.is_empty() {
        domain = domain.with("level", "=", params.level.to_uppercase());
    }
    if !params.func.is_empty() {
        domain = domain.with("func", "ilike", params.func.as_str());
    }

    let logs = match conn
        .search_read(
            "ir.logging",
            &domain,
            &ReadOptions::new()
                .fields([
                    "create_date",
                    "name",
                    "level",
                    "dbname",
                    "func",
                    "path",
                    "line",
                    "message",
                ])
                .limit(u64::from(params.limit))
                .order("create_date desc"),
        )
        .await
    {
        Ok(logs) => logs,
        Err(e) => {
            tracing::debug!("[Tools] ir.logging unreadable: {}", e);
            return Ok(error_record(format!(
                "Cannot read ir.logging: {}. Ensure log_db is configured in odoo.conf.",
                e
            )));
        }
    };

    let entries: Vec<Value> = logs
        .iter()
        .map(|l| {
            json!({
                "timestamp": text(l, "create_date"),
                "level": text(l, "level"),
                "name": text(l, "name"),
                "function": text(l, "func"),
                "path": text(l, "path"),
                "line": get_or(l, "line", json!("")),
                "message": text(l, "message"),
            })
        })
        .collect();

    Ok(json!({
        "total": entries.len(),
        "entries": entries,
    }))
}

pub struct ReadLogEntries;

#[async_trait]
impl Tool for ReadLogEntries {
    fn name(&self) -> &str {
        "read_log_entries"
    }

    fn description(&self) -> &str {
        "Read Odoo log entries from ir.logging (requires log_db to be configured)."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<ReadLogEntriesParams>()
    }

    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value> {
        read_log_entries(ctx.connection(), parse_params(input)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::odoo::test_support::connection;

    fn params(input: Value) -> ReadLogEntriesParams {
        parse_params(&input).unwrap()
    }

    fn with_logs() -> crate::connection::memory::MemoryConnection {
        connection().seed(
            "ir.logging",
            json!([
                {"id": 1, "create_date": "2024-05-01 10:00:00", "name": "odoo.addons.sale",
                 "level": "WARNING", "dbname": "testdb", "func": "action_confirm",
                 "path": "sale/models/sale_order.py", "line": "120", "message": "Late order"},
                {"id": 2, "create_date": "2024-05-02 09:30:00", "name": "odoo.http",
                 "level": "ERROR", "dbname": "testdb", "func": "dispatch",
                 "path": "odoo/http.py", "line": "88", "message": "Boom"}
            ]),
        )
    }

    #[tokio::test]
    async fn test_newest_first() {
        let result = read_log_entries(&with_logs(), params(json!({}))).await.unwrap();
        assert_eq!(result["total"], 2);
        assert_eq!(result["entries"][0]["timestamp"], "2024-05-02 09:30:00");
        assert_eq!(result["entries"][0]["function"], "dispatch");
    }

    #[tokio::test]
    async fn test_level_is_upper_cased() {
        let conn = with_logs();
        let result = read_log_entries(&conn, params(json!({"level": "warning"})))
            .await
            .unwrap();
        assert_eq!(result["total"], 1);
        assert_eq!(result["entries"][0]["message"], "Late order");

        let call = &conn.calls_to("ir.logging", "search_read")[0];
        assert_eq!(call.args[0], json!([["level", "=", "WARNING"]]));
    }

    #[tokio::test]
    async fn test_missing_log_table_gives_hint() {
        let result = read_log_entries(&connection(), params(json!({}))).await.unwrap();
        let message = result["error"].as_str().unwrap();
        assert!(message.starts_with("Cannot read ir.logging"));
        assert!(message.contains("log_db"));
    }
}
