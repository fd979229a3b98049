//! In-memory `OdooConnection` used by the handler tests

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::{OdooConnection, Record};
use crate::core::{BoostError, BoostResult};

/// One recorded `execute` call
#[derive(Debug, Clone)]
pub(crate) struct Call {
    pub model: String,
    pub method: String,
    pub args: Vec<Value>,
    pub kwargs: Map<String, Value>,
}

/// Records keyed by model name plus a simplified domain evaluator
#[derive(Debug, Default)]
pub(crate) struct MemoryConnection {
    records: HashMap<String, Vec<Record>>,
    uid: OnceLock<i64>,
    calls: Mutex<Vec<Call>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the records stored for `model`; `records` must be a JSON array
    /// of objects
    pub fn seed(mut self, model: &str, records: Value) -> Self {
        let rows = match records {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        self.records.insert(model.to_string(), rows);
        self
    }

    /// Mark the connection as logged in without a round trip
    pub fn authenticated(self) -> Self {
        let _ = self.uid.set(2);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls made against `model` with `method`
    pub fn calls_to(&self, model: &str, method: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.model == model && c.method == method)
            .collect()
    }

    fn rows(&self, model: &str) -> BoostResult<&Vec<Record>> {
        self.records
            .get(model)
            .ok_or_else(|| BoostError::ModelNotFound(model.to_string()))
    }

    fn filter(&self, model: &str, domain: Option<&Value>) -> BoostResult<Vec<Record>> {
        let mut rows = self.rows(model)?.clone();
        let terms = domain.and_then(Value::as_array).cloned().unwrap_or_default();
        for term in terms {
            // Prefix operators are ignored; every condition is and-ed
            let Some(parts) = term.as_array().filter(|t| t.len() == 3) else {
                continue;
            };
            let (Some(field), Some(op)) = (parts[0].as_str(), parts[1].as_str()) else {
                continue;
            };
            rows.retain(|row| term_matches(row, field, op, &parts[2]));
        }
        Ok(rows)
    }

    fn search_read_rows(
        &self,
        model: &str,
        args: &[Value],
        kwargs: &Map<String, Value>,
    ) -> BoostResult<Vec<Record>> {
        let mut rows = self.filter(model, args.first())?;

        if let Some(order) = kwargs.get("order").and_then(Value::as_str) {
            let mut parts = order.split(',').next().unwrap_or_default().split_whitespace();
            if let Some(key) = parts.next() {
                let desc = parts.next().is_some_and(|d| d.eq_ignore_ascii_case("desc"));
                rows.sort_by(|a, b| {
                    let ord = compare(a.get(key), b.get(key));
                    if desc { ord.reverse() } else { ord }
                });
            }
        }

        let offset = kwargs.get("offset").and_then(Value::as_u64).unwrap_or(0) as usize;
        let mut rows: Vec<Record> = rows.into_iter().skip(offset).collect();
        if let Some(limit) = kwargs.get("limit").and_then(Value::as_u64) {
            rows.truncate(limit as usize);
        }

        if let Some(fields) = kwargs.get("fields").and_then(Value::as_array) {
            if !fields.is_empty() {
                let wanted: Vec<&str> = std::iter::once("id")
                    .chain(fields.iter().filter_map(Value::as_str))
                    .collect();
                rows = rows
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .filter(|(k, _)| wanted.contains(&k.as_str()))
                            .collect()
                    })
                    .collect();
            }
        }
        Ok(rows)
    }
}

fn lookup(row: &Record, field: &str) -> Value {
    match field.split_once('.') {
        Some((head, _)) => match row.get(head) {
            // Dotted paths compare against the display label of a many2one
            Some(Value::Array(pair)) if pair.len() == 2 => pair[1].clone(),
            Some(other) => other.clone(),
            None => Value::Null,
        },
        None => row.get(field).cloned().unwrap_or(Value::Null),
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn equals(actual: &Value, target: &Value) -> bool {
    match (actual, target) {
        (_, Value::Bool(false)) => matches!(actual, Value::Null | Value::Bool(false)),
        // A many2one `[id, label]` compares by id against numbers
        (Value::Array(pair), Value::Number(_)) if pair.len() == 2 => pair[0] == *target,
        _ => actual == target,
    }
}

fn term_matches(row: &Record, field: &str, op: &str, target: &Value) -> bool {
    let actual = lookup(row, field);
    match op {
        "=" => equals(&actual, target),
        "!=" => !equals(&actual, target),
        "like" => as_text(&actual).contains(&as_text(target)),
        "ilike" => as_text(&actual)
            .to_lowercase()
            .contains(&as_text(target).to_lowercase()),
        "in" => target
            .as_array()
            .is_some_and(|items| items.iter().any(|item| equals(&actual, item))),
        "not in" => !target
            .as_array()
            .is_some_and(|items| items.iter().any(|item| equals(&actual, item))),
        _ => true,
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(x), Some(y)) => as_text(x).cmp(&as_text(y)),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl OdooConnection for MemoryConnection {
    async fn authenticate(&self) -> BoostResult<i64> {
        Ok(*self.uid.get_or_init(|| 2))
    }

    fn uid(&self) -> BoostResult<i64> {
        self.uid.get().copied().ok_or(BoostError::NotAuthenticated)
    }

    async fn execute(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Map<String, Value>,
    ) -> BoostResult<Value> {
        self.uid()?;
        self.calls.lock().unwrap().push(Call {
            model: model.to_string(),
            method: method.to_string(),
            args: args.clone(),
            kwargs: kwargs.clone(),
        });

        match method {
            "search_read" => {
                let rows = self.search_read_rows(model, &args, &kwargs)?;
                Ok(Value::Array(rows.into_iter().map(Value::Object).collect()))
            }
            "search_count" => Ok(Value::from(self.filter(model, args.first())?.len())),
            _ => {
                self.rows(model)?;
                Ok(json!({"method": method, "args": args, "kwargs": kwargs}))
            }
        }
    }

    async fn get_version(&self) -> BoostResult<Record> {
        Ok(json!({
            "server_version": "18.0",
            "server_serie": "18.0",
            "server_version_info": [18, 0, 0, "final", 0, ""],
            "protocol_version": 1
        })
        .as_object()
        .cloned()
        .unwrap_or_default())
    }
}

/// An authenticated connection seeded with a small but realistic database
pub(crate) fn sample_connection() -> MemoryConnection {
    MemoryConnection::new()
        .seed(
            "ir.module.module",
            json!([
                {"id": 1, "name": "base", "shortdesc": "Base", "summary": "Core module",
                 "description": "", "author": "Odoo SA", "website": "https://www.odoo.com",
                 "installed_version": "18.0.1.0.0", "state": "installed",
                 "category_id": [1, "Hidden"], "license": "LGPL-3", "application": false},
                {"id": 2, "name": "sale", "shortdesc": "Sales", "summary": "Sales management",
                 "description": "", "author": "Odoo SA", "website": "https://www.odoo.com",
                 "installed_version": "18.0.1.0.0", "state": "installed",
                 "category_id": [2, "Sales"], "license": "LGPL-3", "application": true},
                {"id": 3, "name": "purchase", "shortdesc": "Purchase", "summary": "Purchase management",
                 "description": "", "author": "Odoo SA", "website": "https://www.odoo.com",
                 "installed_version": "18.0.1.0.0", "state": "uninstalled",
                 "category_id": [3, "Purchases"], "license": "LGPL-3", "application": true}
            ]),
        )
        .seed(
            "ir.model",
            json!([
                {"id": 1, "model": "res.partner", "name": "Contact", "info": "", "field_id": [1, 2, 3]},
                {"id": 2, "model": "sale.order", "name": "Sales Order", "info": "", "field_id": [4, 5]}
            ]),
        )
        .seed(
            "ir.model.fields",
            json!([
                {"id": 1, "model_id": 1, "name": "name", "field_description": "Name",
                 "ttype": "char", "relation": false, "required": true, "readonly": false,
                 "store": true, "index": true, "help": false},
                {"id": 2, "model_id": 1, "name": "email", "field_description": "Email",
                 "ttype": "char", "relation": false, "required": false, "readonly": false,
                 "store": true, "index": false, "help": "Contact email"},
                {"id": 3, "model_id": 1, "name": "company_id", "field_description": "Company",
                 "ttype": "many2one", "relation": "res.company", "required": false,
                 "readonly": false, "store": true, "index": true, "help": false}
            ]),
        )
        .seed(
            "ir.model.data",
            json!([{"id": 1, "module": "base", "model": "ir.model", "res_id": 1}]),
        )
        .seed(
            "ir.ui.view",
            json!([
                {"id": 1, "name": "res.partner.form", "model": "res.partner", "type": "form",
                 "arch": "<form><field name='name'/></form>", "inherit_id": false,
                 "priority": 16, "active": true},
                {"id": 2, "name": "res.partner.list", "model": "res.partner", "type": "list",
                 "arch": "<list><field name='name'/></list>", "inherit_id": [1, "res.partner.form"],
                 "priority": 20, "active": true}
            ]),
        )
        .seed(
            "ir.ui.menu",
            json!([
                {"id": 1, "name": "Sales", "parent_id": false, "action": "ir.actions.act_window,1",
                 "sequence": 10, "child_id": [2], "complete_name": "Sales"},
                {"id": 2, "name": "Orders", "parent_id": [1, "Sales"], "action": false,
                 "sequence": 1, "child_id": [], "complete_name": "Sales / Orders"}
            ]),
        )
        .seed(
            "ir.model.access",
            json!([
                {"id": 1, "name": "access_res_partner_user", "model_id": [1, "res.partner"],
                 "group_id": [1, "base.group_user"], "perm_read": true, "perm_write": true,
                 "perm_create": true, "perm_unlink": false},
                {"id": 2, "name": "access_sale_order_public", "model_id": [2, "sale.order"],
                 "group_id": false, "perm_read": true, "perm_write": false,
                 "perm_create": false, "perm_unlink": false}
            ]),
        )
        .seed(
            "ir.rule",
            json!([
                {"id": 1, "name": "res_partner_rule", "model_id": [1, "res.partner"],
                 "groups": [], "domain_force": "[(1, '=', 1)]", "perm_read": true,
                 "perm_write": true, "perm_create": true, "perm_unlink": true, "global": true}
            ]),
        )
        .seed(
            "ir.config_parameter",
            json!([
                {"id": 1, "key": "web.base.url", "value": "http://localhost:8069"},
                {"id": 2, "key": "database.uuid", "value": "test-uuid-1234"}
            ]),
        )
        .seed(
            "ir.module.module.dependency",
            json!([
                {"id": 1, "name": "base", "module_id": [2, "sale"], "auto_install_required": false}
            ]),
        )
        .seed(
            "res.partner",
            json!([
                {"id": 1, "name": "Azure Interior", "email": "azure@example.com", "is_company": true},
                {"id": 2, "name": "Joel Willis", "email": "joel@example.com", "is_company": false}
            ]),
        )
        .seed(
            "base.automation",
            json!([
                {"id": 1, "name": "Auto-assign partner", "model_name": "res.partner",
                 "trigger": "on_create", "active": true, "action_server_ids": [1]}
            ]),
        )
        .seed(
            "ir.actions.server",
            json!([
                {"id": 1, "name": "Update partner", "model_name": "res.partner", "state": "code",
                 "code": "record.write({'active': True})", "sequence": 5},
                {"id": 2, "name": "Long action", "model_name": "sale.order", "state": "code",
                 "code": "x".repeat(300), "sequence": 7}
            ]),
        )
        .authenticated()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{Domain, ReadOptions};

    #[tokio::test]
    async fn test_requires_authentication() {
        let conn = MemoryConnection::new().seed("res.partner", json!([]));
        let err = conn.search_count("res.partner", &Domain::new()).await.unwrap_err();
        assert!(matches!(err, BoostError::NotAuthenticated));
        assert_eq!(conn.authenticate().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_filters_and_projection() {
        let conn = sample_connection();
        let rows = conn
            .search_read(
                "res.partner",
                &Domain::new().with("is_company", "=", true),
                &ReadOptions::new().fields(["name"]),
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(Value::Object(rows[0].clone()), json!({"id": 1, "name": "Azure Interior"}));
    }

    #[tokio::test]
    async fn test_false_matches_root_menus() {
        let conn = sample_connection();
        let count = conn
            .search_count("ir.ui.menu", &Domain::new().with("parent_id", "=", false))
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_dotted_path_uses_label() {
        let conn = sample_connection();
        let count = conn
            .search_count(
                "ir.model.access",
                &Domain::new().with("model_id.model", "=", "sale.order"),
            )
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_order_offset_limit() {
        let conn = sample_connection();
        let rows = conn
            .search_read(
                "ir.config_parameter",
                &Domain::new(),
                &ReadOptions::new().order("key desc").offset(1).limit(5),
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["key"], "database.uuid");
    }

    #[tokio::test]
    async fn test_unseeded_model() {
        let conn = sample_connection();
        let err = conn.search_count("website.page", &Domain::new()).await.unwrap_err();
        assert!(err.is_missing_model());
    }
}
