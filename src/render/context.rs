//! Canonical values converted into the template engine's value model.

use crate::{config::MissingKey, decode::Mapping};
use gtmpl::Value as TmplValue;
use serde_json::Value;
use std::collections::HashMap;

/// Build the top-level variable scope (`.`) for a render.
///
/// The engine treats missing keys differently by value kind: a `Map`
/// yields `<no value>`, an `Object` fails the lookup. `missing` picks which
/// of the two every mapping becomes.
pub fn build(root: &Mapping, missing: MissingKey) -> TmplValue {
    mapping(root, missing)
}

fn convert(value: &Value, missing: MissingKey) -> TmplValue {
    match value {
        Value::Null => TmplValue::Nil,
        Value::Bool(b) => TmplValue::Bool(*b),
        Value::Number(n) => number(n),
        Value::String(s) => TmplValue::String(s.clone()),
        Value::Array(items) => {
            TmplValue::Array(items.iter().map(|v| convert(v, missing)).collect())
        }
        Value::Object(map) => mapping(map, missing),
    }
}

fn mapping(map: &Mapping, missing: MissingKey) -> TmplValue {
    let fields: HashMap<String, TmplValue> = map
        .iter()
        .map(|(k, v)| (k.clone(), convert(v, missing)))
        .collect();

    match missing {
        MissingKey::Default => TmplValue::Map(fields),
        MissingKey::Error => TmplValue::Object(fields),
    }
}

fn number(n: &serde_json::Number) -> TmplValue {
    if let Some(u) = n.as_u64() {
        TmplValue::from(u)
    } else if let Some(i) = n.as_i64() {
        TmplValue::from(i)
    } else {
        TmplValue::from(n.as_f64().unwrap_or(f64::NAN))
    }
}
