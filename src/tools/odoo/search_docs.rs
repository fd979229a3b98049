//! `search_docs`: links into the official Odoo developer documentation
//!
//! Works offline from a static topic table; only the URL depends on the
//! requested (or configured) Odoo version.

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::core::BoostResult;
use crate::mcp::ServerContext;
use crate::tools::tool::{parse_params, schema_of, Tool};

const DOC_BASE: &str = "https://www.odoo.com/documentation";
const DEFAULT_VERSION: &str = "18";

/// One entry of the documentation index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocTopic {
    pub key: &'static str,
    pub title: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

impl DocTopic {
    const fn new(
        key: &'static str,
        title: &'static str,
        path: &'static str,
        description: &'static str,
    ) -> Self {
        Self { key, title, path, description }
    }

    /// Case-insensitive substring match on key, title and description
    fn matches(&self, needle: &str) -> bool {
        self.key.contains(needle)
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    fn url(&self, version: &str) -> String {
        format!("{}/{}{}", DOC_BASE, version, self.path)
    }
}

pub const DOC_TOPICS: &[DocTopic] = &[
    DocTopic::new(
        "orm",
        "ORM API",
        "/developer/reference/backend/orm.html",
        "Model definitions, fields, CRUD, domains, recordsets.",
    ),
    DocTopic::new(
        "fields",
        "Fields Reference",
        "/developer/reference/backend/orm.html#fields",
        "Field types, attributes, compute, related, default.",
    ),
    DocTopic::new(
        "views",
        "Views",
        "/developer/reference/backend/views.html",
        "Form, tree/list, kanban, search, pivot, graph views.",
    ),
    DocTopic::new(
        "actions",
        "Actions",
        "/developer/reference/backend/actions.html",
        "Window, server, URL, client actions.",
    ),
    DocTopic::new(
        "security",
        "Security",
        "/developer/reference/backend/security.html",
        "Access rights, record rules, groups, ir.model.access.",
    ),
    DocTopic::new(
        "controllers",
        "Controllers / HTTP",
        "/developer/reference/backend/http.html",
        "HTTP controllers, routing, JSON-RPC, requests.",
    ),
    DocTopic::new(
        "qweb",
        "QWeb Templates",
        "/developer/reference/backend/qweb.html",
        "QWeb template engine, t-if, t-foreach, t-call.",
    ),
    DocTopic::new(
        "owl",
        "OWL JavaScript Framework",
        "/developer/reference/frontend/owl_components.html",
        "OWL components, hooks, lifecycle, templating.",
    ),
    DocTopic::new(
        "assets",
        "Assets & Bundles",
        "/developer/reference/frontend/assets.html",
        "JavaScript/CSS assets, asset bundles, inheritance.",
    ),
    DocTopic::new(
        "testing",
        "Testing",
        "/developer/reference/backend/testing.html",
        "Python tests (TransactionCase, HttpCase), JS tests.",
    ),
    DocTopic::new(
        "data",
        "Data Files",
        "/developer/reference/backend/data.html",
        "XML/CSV data files, noupdate, ref, eval.",
    ),
    DocTopic::new(
        "reports",
        "Reports",
        "/developer/reference/backend/reports.html",
        "QWeb reports, PDF generation, report actions.",
    ),
    DocTopic::new(
        "module",
        "Module Structure",
        "/developer/tutorials/server_framework_101/01_architecture.html",
        "Module manifest, directory structure, __manifest__.py.",
    ),
    DocTopic::new(
        "web_services",
        "External API / Web Services",
        "/developer/reference/external_api.html",
        "XML-RPC, JSON-RPC external API.",
    ),
    DocTopic::new(
        "mixins",
        "Mixins",
        "/developer/reference/backend/mixins.html",
        "mail.thread, mail.activity.mixin, portal.mixin.",
    ),
];

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchDocsParams {
    /// Topic keyword (e.g. 'orm', 'views', 'security', 'owl', 'testing').
    /// Leave empty to list all available topics.
    #[serde(default)]
    pub topic: String,

    /// Odoo version (e.g. '17.0', '18.0', '19.0'). Defaults to the project's version.
    #[serde(default)]
    pub version: String,
}

/// Documentation path segment for a version: "17.0" gives "17"
fn doc_version(version: &str) -> String {
    version.trim().replace(".0", "")
}

/// Look up documentation links; `default_version` applies when the request
/// names no version
pub fn search_docs(params: SearchDocsParams, default_version: Option<&str>) -> Value {
    let version = [Some(params.version.as_str()), default_version]
        .into_iter()
        .flatten()
        .map(doc_version)
        .find(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_VERSION.to_string());

    let needle = params.topic.trim().to_lowercase();
    if needle.is_empty() {
        let topics: Vec<Value> = DOC_TOPICS
            .iter()
            .map(|t| json!({"topic": t.key, "title": t.title, "description": t.description}))
            .collect();
        return json!({ "available_topics": topics });
    }

    let results: Vec<Value> = DOC_TOPICS
        .iter()
        .filter(|t| t.matches(&needle))
        .map(|t| {
            json!({
                "topic": t.key,
                "title": t.title,
                "url": t.url(&version),
                "description": t.description,
            })
        })
        .collect();

    if results.is_empty() {
        return json!({
            "message": format!("No documentation found for '{}'.", params.topic),
            "available_topics": DOC_TOPICS.iter().map(|t| t.key).collect::<Vec<_>>(),
        });
    }
    json!({ "results": results })
}

pub struct SearchDocs;

#[async_trait]
impl Tool for SearchDocs {
    fn name(&self) -> &str {
        "search_docs"
    }

    fn description(&self) -> &str {
        "Search Odoo documentation and return relevant links."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<SearchDocsParams>()
    }

    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value> {
        Ok(search_docs(
            parse_params(input)?,
            ctx.config().odoo_version.as_deref(),
        ))
    }
}
