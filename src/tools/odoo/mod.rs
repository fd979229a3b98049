//! Odoo introspection tools
//!
//! Each submodule holds one tool: a typed parameter struct, the handler
//! function and the `Tool` implementation that wires it into the registry.
//! Handlers take the connection explicitly and keep no state between calls.

mod application_info;
mod database_query;
mod database_schema;
mod execute_method;
mod get_config;
mod get_module_info;
mod list_access_rights;
mod list_menus;
mod list_models;
mod list_routes;
mod list_views;
mod list_workflows;
mod read_log_entries;
mod search_docs;
mod search_records;

use serde_json::{Map, Value};

use crate::connection::Record;
use crate::core::{BoostError, BoostResult};

pub use application_info::{application_info, ApplicationInfo};
pub use database_query::{database_query, DatabaseQuery, DatabaseQueryParams};
pub use database_schema::{database_schema, DatabaseSchema, DatabaseSchemaParams};
pub use execute_method::{execute_method, ExecuteMethod, ExecuteMethodParams};
pub use get_config::{get_config, GetConfig, GetConfigParams};
pub use get_module_info::{get_module_info, GetModuleInfo, GetModuleInfoParams};
pub use list_access_rights::{list_access_rights, ListAccessRights, ListAccessRightsParams};
pub use list_menus::{list_menus, ListMenus, ListMenusParams};
pub use list_models::{list_models, ListModels, ListModelsParams};
pub use list_routes::{list_routes, ListRoutes, ListRoutesParams};
pub use list_views::{list_views, ListViews, ListViewsParams};
pub use list_workflows::{list_workflows, ListWorkflows, ListWorkflowsParams};
pub use read_log_entries::{read_log_entries, ReadLogEntries, ReadLogEntriesParams};
pub use search_docs::{search_docs, DocTopic, SearchDocs, SearchDocsParams, DOC_TOPICS};
pub use search_records::{search_records, SearchRecords, SearchRecordsParams};

/// Parse a JSON list of field names; blank input means "all fields"
pub(crate) fn parse_fields(text: &str) -> BoostResult<Vec<String>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).map_err(|e| {
        BoostError::invalid_argument(format!("fields must be a JSON list of strings: {}", e))
    })
}

/// Parse a JSON list of positional arguments; blank input means none
pub(crate) fn parse_args(text: &str) -> BoostResult<Vec<Value>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str(trimmed) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(BoostError::invalid_argument(format!(
            "args must be a JSON list, got {}",
            other
        ))),
        Err(e) => Err(BoostError::invalid_argument(format!("args is not valid JSON: {}", e))),
    }
}

/// Parse a JSON object of keyword arguments; blank input means none
pub(crate) fn parse_kwargs(text: &str) -> BoostResult<Map<String, Value>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str(trimmed) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(BoostError::invalid_argument(format!(
            "kwargs must be a JSON object, got {}",
            other
        ))),
        Err(e) => Err(BoostError::invalid_argument(format!(
            "kwargs is not valid JSON: {}",
            e
        ))),
    }
}

/// Value of `key`, or `default` when the record lacks it
pub(crate) fn get_or(record: &Record, key: &str, default: Value) -> Value {
    record.get(key).cloned().unwrap_or(default)
}

/// String value of `key`, with Odoo's `false` and absent values as ""
pub(crate) fn text(record: &Record, key: &str) -> Value {
    match record.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Value::String(String::new()),
        Some(other) => other.clone(),
    }
}

/// Many2one `[id, label]` as its label; unset relations become null
pub(crate) fn relation_label(value: Option<&Value>) -> Value {
    match value {
        Some(Value::Array(pair)) if pair.len() >= 2 => pair[1].clone(),
        None | Some(Value::Null) | Some(Value::Bool(false)) => Value::Null,
        Some(other) => other.clone(),
    }
}

/// Odoo's falsy "unset" markers (`false`, `""`, absent) as null
pub(crate) fn falsy_to_null(value: Option<&Value>) -> Value {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Value::Null,
        Some(Value::String(s)) if s.is_empty() => Value::Null,
        Some(other) => other.clone(),
    }
}

/// Length of a one2many/many2many id list
pub(crate) fn count_of(record: &Record, key: &str) -> usize {
    record.get(key).and_then(Value::as_array).map_or(0, Vec::len)
}

/// Treat a missing optional model (e.g. `website.page` without the website
/// module) as "no rows"; every other error propagates
pub(crate) fn optional_model(
    model: &str,
    result: BoostResult<Vec<Record>>,
) -> BoostResult<Vec<Record>> {
    match result {
        Err(e) if e.is_missing_model() => {
            tracing::debug!("[Tools] Optional model {} is not installed", model);
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Structured "not found" answer
pub(crate) fn error_record(message: impl Into<String>) -> Value {
    serde_json::json!({ "error": message.into() })
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_fields() {
        assert!(parse_fields("").unwrap().is_empty());
        assert!(parse_fields("[]").unwrap().is_empty());
        assert_eq!(parse_fields(r#"["name", "email"]"#).unwrap(), vec!["name", "email"]);
        assert!(parse_fields(r#"{"name": 1}"#).is_err());
        assert!(parse_fields("[1, 2]").is_err());
    }

    #[test]
    fn test_parse_args_and_kwargs() {
        assert!(parse_args(" ").unwrap().is_empty());
        assert_eq!(parse_args("[[1, 2], \"x\"]").unwrap(), vec![json!([1, 2]), json!("x")]);
        assert!(parse_args("{}").is_err());

        assert!(parse_kwargs("").unwrap().is_empty());
        assert_eq!(parse_kwargs(r#"{"limit": 3}"#).unwrap()["limit"], 3);
        assert!(parse_kwargs("[]").is_err());
        assert!(parse_kwargs("{oops").is_err());
    }

    #[test]
    fn test_relation_label() {
        assert_eq!(relation_label(Some(&json!([1, "Sales"]))), json!("Sales"));
        assert_eq!(relation_label(Some(&json!(false))), Value::Null);
        assert_eq!(relation_label(None), Value::Null);
        assert_eq!(relation_label(Some(&json!(7))), json!(7));
    }

    #[test]
    fn test_falsy_to_null() {
        assert_eq!(falsy_to_null(Some(&json!(false))), Value::Null);
        assert_eq!(falsy_to_null(Some(&json!(""))), Value::Null);
        assert_eq!(falsy_to_null(Some(&json!("res.company"))), json!("res.company"));
    }

    #[test]
    fn test_optional_model_downgrades_only_missing_model() {
        let missing = optional_model("website.page", Err(BoostError::ModelNotFound("website.page".into())));
        assert!(missing.unwrap().is_empty());

        let fault = optional_model(
            "website.page",
            Err(BoostError::Fault { code: 1, message: "Invalid field".into() }),
        );
        assert!(fault.is_err());
    }
}
