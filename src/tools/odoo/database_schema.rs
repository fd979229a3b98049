//! `database_schema`: field definitions of a model

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{error_record, falsy_to_null, get_or, text};
use crate::connection::{Domain, OdooConnection, ReadOptions};
use crate::core::BoostResult;
use crate::mcp::ServerContext;
use crate::tools::tool::{parse_params, schema_of, Tool};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DatabaseSchemaParams {
    /// Technical model name, e.g. 'res.partner'
    pub model_name: String,
}

pub async fn database_schema(
    conn: &dyn OdooConnection,
    params: DatabaseSchemaParams,
) -> BoostResult<Value> {
    let models = conn
        .search_read(
            "ir.model",
            &Domain::new().with("model", "=", params.model_name.as_str()),
            &ReadOptions::new()
                .fields(["id", "name", "model", "info"])
                .limit(1),
        )
        .await?;

    let Some(ir_model) = models.first() else {
        return Ok(error_record(format!("Model '{}' not found.", params.model_name)));
    };

    let fields = conn
        .search_read(
            "ir.model.fields",
            &Domain::new().with("model_id", "=", get_or(ir_model, "id", Value::Null)),
            &ReadOptions::new()
                .fields([
                    "name",
                    "field_description",
                    "ttype",
                    "relation",
                    "required",
                    "readonly",
                    "store",
                    "index",
                    "help",
                    "selection_ids",
                ])
                .order("name"),
        )
        .await?;

    let fields: Vec<Value> = fields
        .iter()
        .map(|f| {
            json!({
                "name": get_or(f, "name", Value::Null),
                "label": text(f, "field_description"),
                "type": get_or(f, "ttype", Value::Null),
                "relation": falsy_to_null(f.get("relation")),
                "required": get_or(f, "required", json!(false)),
                "readonly": get_or(f, "readonly", json!(false)),
                "stored": get_or(f, "store", json!(true)),
                "indexed": get_or(f, "index", json!(false)),
                "help": falsy_to_null(f.get("help")),
            })
        })
        .collect();

    Ok(json!({
        "model": get_or(ir_model, "model", Value::Null),
        "name": get_or(ir_model, "name", Value::Null),
        "info": text(ir_model, "info"),
        "field_count": fields.len(),
        "fields": fields,
    }))
}

pub struct DatabaseSchema;

#[async_trait]
impl Tool for DatabaseSchema {
    fn name(&self) -> &str {
        "database_schema"
    }

    fn description(&self) -> &str {
        "Get the field definitions (schema) of an Odoo model."
    }

    fn input_schema(&self) -> Map<String, Value> {
        schema_of::<DatabaseSchemaParams>()
    }

    async fn execute(&self, ctx: &ServerContext, input: &Value) -> BoostResult<Value> {
        database_schema(ctx.connection(), parse_params(input)?).await
    }
}
