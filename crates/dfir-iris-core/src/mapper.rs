//! Typed argument values to query strings and JSON bodies
//!
//! Arguments are serialized once through serde into a field map, then
//! filtered: excluded names and null values are dropped. Optional fields are
//! `Option<T>`, so `None` disappears from the wire while `Some(0)`,
//! `Some(String::new())` and `Some(false)` survive. That distinction is what
//! makes partial updates work: absent means "leave unchanged", empty means
//! "clear".

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Query parameters, kept sorted for a deterministic wire order
pub type Query = BTreeMap<String, String>;

/// JSON request body
pub type Body = Map<String, Value>;

/// Map `args` into query parameters
///
/// Strings render as-is, numbers and booleans via their textual form.
/// Nested values are not expected in query position and render as compact JSON.
pub fn to_query<T: Serialize + ?Sized>(args: &T, exclude: &[&str]) -> Result<Query> {
    Ok(filtered(args, exclude)?
        .into_iter()
        .map(|(key, value)| (key, scalar_text(value)))
        .collect())
}

/// Map `args` into a JSON body, passing nested values through untouched
pub fn to_body<T: Serialize + ?Sized>(args: &T, exclude: &[&str]) -> Result<Body> {
    filtered(args, exclude)
}

/// `{"cid": "<case_id>"}`, the query carried by every case-scoped endpoint
pub fn cid_query(case_id: i64) -> Query {
    Query::from([("cid".to_string(), case_id.to_string())])
}

fn filtered<T: Serialize + ?Sized>(args: &T, exclude: &[&str]) -> Result<Body> {
    let value = serde_json::to_value(args)
        .map_err(|e| Error::request(format!("serializing arguments: {}", e)))?;

    let mut fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(Error::request(format!(
                "arguments must serialize to an object, got {}",
                kind_name(&other)
            )))
        }
    };

    fields.retain(|key, value| !value.is_null() && !exclude.contains(&key.as_str()));
    Ok(fields)
}

fn scalar_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
