//! `search_records`: paginated record search with smaller default pages

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::database_query::paged_search;
use crate::connection::OdooConnection;
use crate::core::BoostResult;
use crate::mcp::ServerContext;
use crate::tools::tool::{parse_params, schema_of, Tool};

fn default_json_list() -> String {
    "[]".to_string()
}

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchRecordsParams {
    /// Technical model name, e.g. 'res.partner'
    pub model: String,

    /// Odoo domain filter as JSON string, e.g. '[["is_company","=",true]]'
    #[serde(default = "default_json_list")]
    pub domain: String,

    /// JSON list of field names, e.g. '["name","email"]'. Empty for default fields.
    #[serde(default = "default_json_list")]
    pub fields: String,

    /// Maximum records to return (default 20)
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Number of records to skip (default 0)
    #[serde(default)]
    pub offset: u32,

    /// Sort order, e.g. 'name asc, id desc'
    #[serde(default)]
    pub order: String,
}

pub async fn search_records(
    conn: &dyn OdooConnection,
    params: SearchRecordsParams,
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

pub struct SearchRecords;

#[async_trait]
impl Tool for SearchRecords {
    fn name(&self) -> &str {
        "search_records"
    }

    fn description(&self) -> &str {
        "Search and read records from any Odoo model with domain filtering and pagination."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<SearchRecordsParams>()
    }

    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value> {
        search_records(ctx.connection(), parse_params(input)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::odoo::test_support::connection;
    use serde_json::json;

    fn params(input: Value) -> SearchRecordsParams {
        parse_params(&input).unwrap()
    }

    #[tokio::test]
    async fn test_basic_search() {
        let result = search_records(&connection(), params(json!({"model": "res.partner"})))
            .await
            .unwrap();
        assert_eq!(result["model"], "res.partner");
        assert_eq!(result["total_count"], 2);
        assert_eq!(result["limit"], 20);
    }

    #[tokio::test]
    async fn test_with_domain() {
        let result = search_records(
            &connection(),
            params(json!({"model": "res.partner", "domain": "[[\"is_company\", \"=\", true]]"})),
        )
        .await
        .unwrap();
        assert_eq!(result["total_count"], 1);
    }

    #[tokio::test]
    async fn test_order_and_offset() {
        let result = search_records(
            &connection(),
            params(json!({"model": "res.partner", "order": "name desc", "offset": 1})),
        )
        .await
        .unwrap();
        assert_eq!(result["returned_count"], 1);
        assert_eq!(result["offset"], 1);
        assert_eq!(result["records"][0]["name"], "Azure Interior");
    }
}
