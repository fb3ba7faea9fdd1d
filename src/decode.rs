//! JSON and YAML documents decoded into one canonical value model.
//!
//! The canonical model is [`serde_json::Value`]: null, bool, number, string,
//! sequence and string-keyed mapping. Both decoders return the document's
//! root [`Mapping`]; a root that is not a mapping yields an empty one.

use crate::{
    config::DataFormat,
    error::{Error, Result},
};
use serde::Deserialize;
use serde_json::Value;

pub type Mapping = serde_json::Map<String, Value>;

/// Decode `text` with the decoder selected by `format`.
pub fn decode(format: DataFormat, text: &str) -> Result<Mapping> {
    match format {
        DataFormat::Json => decode_json(text),
        DataFormat::Yaml => decode_yaml(text),
    }
}

pub fn decode_json(text: &str) -> Result<Mapping> {
    let value: Value = serde_json::from_str(text).map_err(|e| Error::Decode {
        format: DataFormat::Json,
        source: Box::new(e),
    })?;
    Ok(into_mapping(value, DataFormat::Json))
}

/// Only the first document of a multi-document stream is decoded. Merge
/// keys (`<<: *anchor`) are resolved.
pub fn decode_yaml(text: &str) -> Result<Mapping> {
    let yaml_error = |e: serde_yaml::Error| Error::Decode {
        format: DataFormat::Yaml,
        source: Box::new(e),
    };

    let mut value = match serde_yaml::Deserializer::from_str(text).next() {
        Some(doc) => serde_yaml::Value::deserialize(doc).map_err(yaml_error)?,
        None => serde_yaml::Value::Null,
    };
    value.apply_merge().map_err(yaml_error)?;

    Ok(into_mapping(from_yaml(value), DataFormat::Yaml))
}

fn into_mapping(value: Value, format: DataFormat) -> Mapping {
    match value {
        Value::Object(map) => map,
        Value::Null => Mapping::new(),
        other => {
            log::warn!(
                "{format} document root is {}, not a mapping; no fields will be bound",
                kind(&other)
            );
            Mapping::new()
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

fn from_yaml(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Y;

    match value {
        Y::Null => Value::Null,
        Y::Bool(b) => Value::Bool(b),
        Y::Number(n) => from_yaml_number(&n),
        Y::String(s) => Value::String(s),
        Y::Sequence(seq) => Value::Array(seq.into_iter().map(from_yaml).collect()),
        Y::Mapping(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (key_text(k), from_yaml(v)))
                .collect(),
        ),
        Y::Tagged(tagged) => from_yaml(tagged.value),
    }
}

/// Integers stay integers; `.nan` and `.inf` have no JSON number form and
/// are kept as their YAML spelling.
fn from_yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(u) = n.as_u64() {
        Value::from(u)
    } else if let Some(i) = n.as_i64() {
        Value::from(i)
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map_or_else(|| Value::String(n.to_string()), Value::Number)
    }
}

/// YAML allows any node as a mapping key; the canonical model only has
/// string keys.
fn key_text(key: serde_yaml::Value) -> String {
    use serde_yaml::Value as Y;

    match key {
        Y::String(s) => s,
        Y::Null => "null".to_owned(),
        Y::Bool(b) => b.to_string(),
        Y::Number(n) => n.to_string(),
        Y::Tagged(tagged) => key_text(tagged.value),
        complex => serde_yaml::to_string(&complex)
            .map(|s| s.trim_end().to_owned())
            .unwrap_or_default(),
    }
}
