//! XML-RPC wire codec
//!
//! Encodes method calls from `serde_json::Value` parameters and decodes
//! `methodResponse` documents back into `Value`. Faults become
//! [`BoostError::Fault`].

use chrono::NaiveDateTime;
use roxmltree::{Document, Node};
use serde_json::{Map, Number, Value};

use crate::core::{BoostError, BoostResult};

/// Build a `methodCall` document
pub fn encode_call(method: &str, params: &[Value]) -> String {
    let mut out = String::with_capacity(256);
    out.push_str("<?xml version=\"1.0\"?>\n<methodCall><methodName>");
    escape_into(&mut out, method);
    out.push_str("</methodName><params>");
    for param in params {
        out.push_str("<param>");
        encode_value(&mut out, param);
        out.push_str("</param>");
    }
    out.push_str("</params></methodCall>\n");
    out
}

fn encode_value(out: &mut String, value: &Value) {
    out.push_str("<value>");
    match value {
        Value::Null => out.push_str("<nil/>"),
        Value::Bool(b) => {
            out.push_str("<boolean>");
            out.push(if *b { '1' } else { '0' });
            out.push_str("</boolean>");
        }
        Value::Number(n) => encode_number(out, n),
        Value::String(s) => {
            out.push_str("<string>");
            escape_into(out, s);
            out.push_str("</string>");
        }
        Value::Array(items) => {
            out.push_str("<array><data>");
            for item in items {
                encode_value(out, item);
            }
            out.push_str("</data></array>");
        }
        Value::Object(map) => {
            out.push_str("<struct>");
            for (key, item) in map {
                out.push_str("<member><name>");
                escape_into(out, key);
                out.push_str("</name>");
                encode_value(out, item);
                out.push_str("</member>");
            }
            out.push_str("</struct>");
        }
    }
    out.push_str("</value>");
}

fn encode_number(out: &mut String, n: &Number) {
    if let Some(i) = n.as_i64() {
        if i32::try_from(i).is_ok() {
            out.push_str(&format!("<int>{}</int>", i));
        } else {
            out.push_str(&format!("<i8>{}</i8>", i));
        }
    } else if let Some(u) = n.as_u64() {
        out.push_str(&format!("<i8>{}</i8>", u));
    } else {
        let f = n.as_f64().unwrap_or_default();
        out.push_str(&format!("<double>{}</double>", f));
    }
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Decode a `methodResponse` document into its single return value
pub fn decode_response(body: &str) -> BoostResult<Value> {
    let doc = Document::parse(body)
        .map_err(|e| BoostError::Protocol(format!("invalid XML: {}", e)))?;

    let root = doc.root_element();
    if root.tag_name().name() != "methodResponse" {
        return Err(BoostError::Protocol(format!(
            "expected <methodResponse>, got <{}>",
            root.tag_name().name()
        )));
    }

    let Some(first) = element_children(root).next() else {
        return Err(BoostError::Protocol("empty <methodResponse>".into()));
    };

    match first.tag_name().name() {
        "params" => {
            let value = element_children(first)
                .find(|n| n.has_tag_name("param"))
                .and_then(|param| element_children(param).find(|n| n.has_tag_name("value")));
            match value {
                Some(node) => decode_value(node),
                None => Ok(Value::Null),
            }
        }
        "fault" => {
            let node = element_children(first)
                .find(|n| n.has_tag_name("value"))
                .ok_or_else(|| BoostError::Protocol("<fault> without <value>".into()))?;
            Err(fault_from_value(decode_value(node)?))
        }
        other => Err(BoostError::Protocol(format!(
            "unexpected <{}> in <methodResponse>",
            other
        ))),
    }
}

fn fault_from_value(value: Value) -> BoostError {
    let code = value
        .get("faultCode")
        .and_then(|c| c.as_i64().or_else(|| c.as_str().and_then(|s| s.parse().ok())))
        .unwrap_or_default();
    let message = value
        .get("faultString")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    BoostError::Fault { code, message }
}

fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

fn node_text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

fn decode_value(node: Node<'_, '_>) -> BoostResult<Value> {
    // A <value> without a type element is an untyped string
    let Some(typed) = element_children(node).next() else {
        return Ok(Value::String(node_text(node)));
    };

    let text = node_text(typed);
    match typed.tag_name().name() {
        "int" | "i4" | "i8" => text
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| BoostError::Protocol(format!("invalid integer '{}'", text))),
        "boolean" => match text.trim() {
            "1" => Ok(Value::Bool(true)),
            "0" => Ok(Value::Bool(false)),
            other => Err(BoostError::Protocol(format!("invalid boolean '{}'", other))),
        },
        "double" => {
            let f = text
                .trim()
                .parse::<f64>()
                .map_err(|_| BoostError::Protocol(format!("invalid double '{}'", text)))?;
            Ok(Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null))
        }
        "string" => Ok(Value::String(text)),
        "nil" => Ok(Value::Null),
        "base64" => Ok(Value::String(text.split_whitespace().collect())),
        "dateTime.iso8601" => Ok(Value::String(decode_datetime(text.trim()))),
        "array" => {
            let mut items = Vec::new();
            if let Some(data) = element_children(typed).find(|n| n.has_tag_name("data")) {
                for child in element_children(data).filter(|n| n.has_tag_name("value")) {
                    items.push(decode_value(child)?);
                }
            }
            Ok(Value::Array(items))
        }
        "struct" => {
            let mut map = Map::new();
            for member in element_children(typed).filter(|n| n.has_tag_name("member")) {
                let name = element_children(member)
                    .find(|n| n.has_tag_name("name"))
                    .map(node_text)
                    .ok_or_else(|| BoostError::Protocol("<member> without <name>".into()))?;
                let value = match element_children(member).find(|n| n.has_tag_name("value")) {
                    Some(v) => decode_value(v)?,
                    None => Value::Null,
                };
                map.insert(name, value);
            }
            Ok(Value::Object(map))
        }
        other => Err(BoostError::Protocol(format!("unknown value type <{}>", other))),
    }
}

/// Normalize XML-RPC timestamps to Odoo's `YYYY-MM-DD HH:MM:SS` form
fn decode_datetime(raw: &str) -> String {
    ["%Y%m%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| raw.to_string())
}
