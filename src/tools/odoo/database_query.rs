//! `database_query`: ORM `search_read` on any model

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::parse_fields;
use crate::connection::{Domain, OdooConnection, ReadOptions};
use crate::core::BoostResult;
use crate::mcp::ServerContext;
use crate::tools::tool::{parse_params, schema_of, Tool};

fn default_domain() -> String {
    "[]".to_string()
}

fn default_fields() -> String {
    "[]".to_string()
}

fn default_limit() -> u32 {
    80
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DatabaseQueryParams {
    /// Technical model name, e.g. 'res.partner'
    pub model: String,

    /// Odoo domain filter as JSON string, e.g. '[["is_company","=",true]]'
    #[serde(default = "default_domain")]
    pub domain: String,

    /// JSON list of field names to return, e.g. '["name","email"]'. Empty for all.
    #[serde(default = "default_fields")]
    pub fields: String,

    /// Maximum number of records to return (default 80)
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Number of records to skip (default 0)
    #[serde(default)]
    pub offset: u32,

    /// Sort order, e.g. 'name asc, id desc'
    #[serde(default)]
    pub order: String,
}

/// One page of records plus the total match count
///
/// Shared by `database_query` and `search_records`.
pub(crate) async fn paged_search(
    conn: &dyn OdooConnection,
    model: &str,
    domain: &str,
    fields: &str,
    limit: u32,
    offset: u32,
    order: &str,
) -> BoostResult<Value> {
    let domain = Domain::from_json_str(domain)?;
    let fields = parse_fields(fields)?;

    let mut options = ReadOptions::new()
        .limit(u64::from(limit))
        .offset(u64::from(offset))
        .order(order);
    if !fields.is_empty() {
        options = options.fields(fields);
    }

    let records = conn.search_read(model, &domain, &options).await?;
    let total = conn.search_count(model, &domain).await?;

    Ok(json!({
        "model": model,
        "total_count": total,
        "returned_count": records.len(),
        "offset": offset,
        "limit": limit,
        "records": records,
    }))
}

pub async fn database_query(
    conn: &dyn OdooConnection,
    params: DatabaseQueryParams,
) -> BoostResult<Value> {
    paged_search(
        conn,
        &params.model,
        &params.domain,
        &params.fields,
        params.limit,
        params.offset,
        &params.order,
    )
    .await
}

pub struct DatabaseQuery;

#[async_trait]
impl Tool for DatabaseQuery {
    fn name(&self) -> &str {
        "database_query"
    }

    fn description(&self) -> &str {
        "Execute an ORM search_read on any Odoo model (safe, respects access rights)."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<DatabaseQueryParams>()
    }

    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value> {
        database_query(ctx.connection(), parse_params(input)?).await
    }
}
