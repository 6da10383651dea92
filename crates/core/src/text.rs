//! Text measurement and structural helpers shared by every stage.

use serde_json::Value;
use std::collections::BTreeSet;

/// Length in characters (Unicode scalar values), not bytes.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Type-aware flattened length of a serialized value.
///
/// Strings count their characters, arrays and objects sum their members.
/// Numbers, booleans and nulls contribute nothing.
pub fn flattened_len(value: &Value) -> usize {
    match value {
        Value::String(s) => char_len(s),
        Value::Array(items) => items.iter().map(flattened_len).sum(),
        Value::Object(map) => map.values().map(flattened_len).sum(),
        _ => 0,
    }
}

/// Every object key path in a serialized value, e.g. `action_guide.do`.
///
/// Array elements are not descended into; list length is content,
/// not structure.
pub fn key_paths(value: &Value) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    collect_paths(value, "", &mut paths);
    paths
}

fn collect_paths(value: &Value, prefix: &str, out: &mut BTreeSet<String>) {
    if let Value::Object(map) = value {
        for (key, child) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            collect_paths(child, &path, out);
            out.insert(path);
        }
    }
}

/// Join non-empty items with `", "`, or return `fallback` when none remain.
pub fn join_or(items: &[String], fallback: &str) -> String {
    let kept: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if kept.is_empty() {
        fallback.to_string()
    } else {
        kept.join(", ")
    }
}
