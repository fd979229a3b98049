//! `list_routes`: website pages and URL rewrites
//!
//! Both models come with the website module and may be absent.

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{get_or, optional_model, text};
use crate::connection::{Domain, OdooConnection, ReadOptions};
use crate::core::BoostResult;
use crate::mcp::ServerContext;
use crate::tools::tool::{parse_params, schema_of, Tool};

fn default_limit() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListRoutesParams {
    /// Optional substring filter on URL path
    #[serde(default)]
    pub filter_url: String,

    /// Maximum number of routes to return per source (default 100)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub async fn list_routes(conn: &dyn OdooConnection, params: ListRoutesParams) -> BoostResult<Value> {
    let limit = u64::from(params.limit);
    let mut routes = Vec::new();

    let mut page_domain = Domain::new();
    if !params.filter_url.is_empty() {
        page_domain = page_domain.with("url", "ilike", params.filter_url.as_str());
    }
    let pages = optional_model(
        "website.page",
        conn.search_read(
            "website.page",
            &page_domain,
            &ReadOptions::new()
                .fields(["name", "url", "is_published", "website_id"])
                .limit(limit)
                .order("url"),
        )
        .await,
    )?;
    routes.extend(pages.iter().map(|p| {
        json!({
            "type": "page",
            "url": text(p, "url"),
            "name": text(p, "name"),
            "published": get_or(p, "is_published", json!(false)),
        })
    }));

    let mut rewrite_domain = Domain::new();
    if !params.filter_url.is_empty() {
        rewrite_domain = rewrite_domain.with("url_from", "ilike", params.filter_url.as_str());
    }
    let rewrites = optional_model(
        "website.rewrite",
        conn.search_read(
            "website.rewrite",
            &rewrite_domain,
            &ReadOptions::new()
                .fields(["name", "url_from", "url_to"])
                .limit(limit),
        )
        .await,
    )?;
    routes.extend(rewrites.iter().map(|r| {
        json!({
            "type": "rewrite",
            "url": text(r, "url_from"),
            "target": text(r, "url_to"),
            "name": text(r, "name"),
        })
    }));

    Ok(json!({
        "total": routes.len(),
        "routes": routes,
    }))
}

pub struct ListRoutes;

#[async_trait]
impl Tool for ListRoutes {
    fn name(&self) -> &str {
        "list_routes"
    }

    fn description(&self) -> &str {
        "List website pages and URL rewrites (requires the website module; empty otherwise)."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<ListRoutesParams>()
    }

    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value> {
        list_routes(ctx.connection(), parse_params(input)?).await
    }
}
