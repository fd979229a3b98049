//! Odoo connection layer
//!
//! `OdooConnection` is the seam every tool handler talks through. The only
//! production implementation is [`XmlRpcConnection`]; tests use an in-memory
//! double.

pub mod codec;
mod factory;
#[cfg(test)]
pub(crate) mod memory;
mod xmlrpc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::core::{BoostError, BoostResult};

pub use factory::create_connection;
pub use xmlrpc::XmlRpcConnection;

/// A single record as returned by `search_read`
pub type Record = Map<String, Value>;

/// An Odoo search domain: conditions like `["name", "=", "x"]` and prefix
/// operators (`"|"`, `"&"`, `"!"`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Domain {
    terms: Vec<Value>,
}

impl Domain {
    /// The empty domain (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `[field, operator, value]` condition
    pub fn with(mut self, field: &str, operator: &str, value: impl Into<Value>) -> Self {
        self.terms
            .push(Value::Array(vec![field.into(), operator.into(), value.into()]));
        self
    }

    /// Append a prefix operator such as `"|"`
    pub fn with_operator(mut self, operator: &str) -> Self {
        self.terms.push(Value::String(operator.to_string()));
        self
    }

    /// Parse a domain from its JSON text form
    ///
    /// Blank input is the empty domain. Anything that is not a JSON array is
    /// rejected.
    pub fn from_json_str(text: &str) -> BoostResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Self::new());
        }
        let value: Value = serde_json::from_str(trimmed)
            .map_err(|e| BoostError::invalid_argument(format!("domain is not valid JSON: {}", e)))?;
        match value {
            Value::Array(terms) => Ok(Self { terms }),
            other => Err(BoostError::invalid_argument(format!(
                "domain must be a JSON array, got {}",
                other
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[Value] {
        &self.terms
    }

    pub fn to_value(&self) -> Value {
        Value::Array(self.terms.clone())
    }
}

/// Optional arguments for `search_read`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadOptions {
    /// Fields to return; `None` means all fields
    pub fields: Option<Vec<String>>,
    pub limit: Option<u64>,
    pub offset: u64,
    /// Odoo order clause, e.g. `"name asc, id desc"`
    pub order: Option<String>,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the order clause; blank strings leave the server default in place
    pub fn order(mut self, order: impl Into<String>) -> Self {
        let order = order.into();
        self.order = if order.trim().is_empty() { None } else { Some(order) };
        self
    }

    /// Keyword arguments for `execute_kw`
    pub fn to_kwargs(&self) -> Map<String, Value> {
        let mut kwargs = Map::new();
        kwargs.insert("offset".into(), Value::from(self.offset));
        if let Some(fields) = &self.fields {
            kwargs.insert("fields".into(), Value::from(fields.clone()));
        }
        if let Some(limit) = self.limit {
            kwargs.insert("limit".into(), Value::from(limit));
        }
        if let Some(order) = &self.order {
            kwargs.insert("order".into(), Value::from(order.clone()));
        }
        kwargs
    }
}

/// Authenticated access to an Odoo database
///
/// Every operation except `authenticate` and `get_version` requires a prior
/// successful `authenticate` and fails with [`BoostError::NotAuthenticated`]
/// otherwise.
#[async_trait]
pub trait OdooConnection: Send + Sync {
    /// Log in and return the user id
    async fn authenticate(&self) -> BoostResult<i64>;

    /// The user id obtained by the last successful `authenticate`
    fn uid(&self) -> BoostResult<i64>;

    /// Invoke an ORM method through `execute_kw`
    async fn execute(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Map<String, Value>,
    ) -> BoostResult<Value>;

    /// Search and read records in one round trip
    async fn search_read(
        &self,
        model: &str,
        domain: &Domain,
        options: &ReadOptions,
    ) -> BoostResult<Vec<Record>> {
        let value = self
            .execute(model, "search_read", vec![domain.to_value()], options.to_kwargs())
            .await?;
        records_from_value(value)
    }

    /// Count records matching `domain`
    async fn search_count(&self, model: &str, domain: &Domain) -> BoostResult<u64> {
        let value = self
            .execute(model, "search_count", vec![domain.to_value()], Map::new())
            .await?;
        value.as_u64().ok_or_else(|| {
            BoostError::Protocol(format!("search_count returned {}", value))
        })
    }

    /// Server version information (`server_version`, `server_version_info`, ...)
    async fn get_version(&self) -> BoostResult<Record>;
}

/// Interpret a `search_read` result as a list of records
pub fn records_from_value(value: Value) -> BoostResult<Vec<Record>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map),
                other => Err(BoostError::Protocol(format!(
                    "expected a record, got {}",
                    other
                ))),
            })
            .collect(),
        other => Err(BoostError::Protocol(format!(
            "expected a list of records, got {}",
            other
        ))),
    }
}
