//! `application_info`: server version and installed modules

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{get_or, text};
use crate::connection::{Domain, OdooConnection, ReadOptions};
use crate::core::BoostResult;
use crate::mcp::ServerContext;
use crate::tools::tool::{schema_of, Tool};

/// No parameters
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ApplicationInfoParams {}

pub async fn application_info(conn: &dyn OdooConnection) -> BoostResult<Value> {
    let version = conn.get_version().await?;

    let modules = conn
        .search_read(
            "ir.module.module",
            &Domain::new().with("state", "=", "installed"),
            &ReadOptions::new()
                .fields(["name", "shortdesc", "installed_version"])
                .order("name"),
        )
        .await?;

    let installed: Vec<Value> = modules
        .iter()
        .map(|m| {
            json!({
                "name": get_or(m, "name", Value::Null),
                "description": text(m, "shortdesc"),
                "version": text(m, "installed_version"),
            })
        })
        .collect();

    Ok(json!({
        "server_version": get_or(&version, "server_version", json!("unknown")),
        "server_serie": get_or(&version, "server_serie", json!("unknown")),
        "protocol_version": get_or(&version, "protocol_version", json!(1)),
        "installed_modules_count": installed.len(),
        "installed_modules": installed,
    }))
}

pub struct ApplicationInfo;

#[async_trait]
impl Tool for ApplicationInfo {
    fn name(&self) -> &str {
        "application_info"
    }

    fn description(&self) -> &str {
        "Get Odoo application info: server version, installed modules, database details."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<ApplicationInfoParams>()
    }

    async fn execute(&self, ctx: &ServerContext, _input: &Value) -> BoostResult<Value> {
        application_info(ctx.connection()).await
    }
}
