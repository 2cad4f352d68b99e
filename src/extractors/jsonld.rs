//! JSON-LD lookups over script payloads
//!
//! Payloads are parsed one at a time and searched for objects of the wanted
//! `@type`, descending into `@graph` arrays and top-level arrays. Inline
//! JavaScript simply fails to parse and is skipped.

use serde_json::Value;
use tracing::trace;

use crate::document::DocumentView;

/// Resolve `path` (and optionally `qualifier_path`) on the first object of
/// `type_name` that yields a usable value, in document order.
pub(super) fn find_in_jsonld(
    view: &DocumentView,
    type_name: &str,
    path: &[String],
    qualifier_path: Option<&[String]>,
) -> Option<(String, Option<String>)> {
    view.script_payloads().iter().find_map(|payload| {
        let json = match serde_json::from_str::<Value>(payload.trim()) {
            Ok(json) => json,
            Err(e) => {
                trace!("skipping non-JSON script payload: {}", e);
                return None;
            }
        };

        let mut objects = Vec::new();
        typed_objects(&json, type_name, &mut objects);

        objects.into_iter().find_map(|obj| {
            let value = navigate(obj, path).and_then(scalar_text)?;
            let qualifier = qualifier_path
                .and_then(|q| navigate(obj, q))
                .and_then(scalar_text);
            Some((value, qualifier))
        })
    })
}

/// Objects whose `@type` (a string or a list, schema.org prefix optional)
/// names `type_name`. `@graph` members come before their container.
fn typed_objects<'a>(value: &'a Value, type_name: &str, found: &mut Vec<&'a Value>) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::Array(graph)) = obj.get("@graph") {
                for item in graph {
                    typed_objects(item, type_name, found);
                }
            }

            let matches = match obj.get("@type") {
                Some(Value::String(t)) => is_type(t, type_name),
                Some(Value::Array(types)) => types
                    .iter()
                    .filter_map(Value::as_str)
                    .any(|t| is_type(t, type_name)),
                _ => false,
            };
            if matches {
                found.push(value);
            }
        }
        Value::Array(items) => {
            for item in items {
                typed_objects(item, type_name, found);
            }
        }
        _ => {}
    }
}

fn is_type(declared: &str, type_name: &str) -> bool {
    declared
        .strip_prefix("https://schema.org/")
        .or_else(|| declared.strip_prefix("http://schema.org/"))
        .unwrap_or(declared)
        == type_name
}

/// Walk object keys; arrays (e.g. several `offers`) step into their first element.
fn navigate<'a>(value: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = value;
    for segment in path {
        current = first_if_array(current)?.get(segment.as_str())?;
    }
    first_if_array(current)
}

fn first_if_array(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(arr) => arr.first(),
        other => Some(other),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
