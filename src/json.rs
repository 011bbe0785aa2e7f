//! JSON-backed field injection.
//!
//! A ready-made implementation of the injection seam that binds raw values
//! into a `serde_json` object map, coercing each value to a declared JSON
//! type. Useful when the command "object" is a structured payload handed to
//! a downstream executor rather than a concrete struct.

use serde_json::{Map, Value, json};

/// A command instance represented as a JSON object.
pub type JsonCommand = Map<String, Value>;

/// Declared JSON type of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
}

/// Coerce one raw value to `kind`.
pub fn coerce(kind: ValueKind, raw: &str) -> Result<Value, String> {
    match kind {
        ValueKind::String => Ok(json!(raw)),
        ValueKind::Number => raw
            .parse::<f64>()
            .map(|n| json!(n))
            .map_err(|_| format!("expected number, got: {raw}")),
        ValueKind::Boolean => match raw.to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(json!(true)),
            "false" | "no" | "0" | "off" => Ok(json!(false)),
            _ => Err(format!("expected boolean, got: {raw}")),
        },
    }
}

/// Build a scalar injector that stores the coerced value under `key`.
pub fn scalar_injector(
    key: impl Into<String>,
    kind: ValueKind,
) -> impl Fn(&mut JsonCommand, &str) -> Result<(), String> + Send + Sync + 'static {
    let key = key.into();
    move |target, raw| {
        let value = coerce(kind, raw)?;
        target.insert(key.clone(), value);
        Ok(())
    }
}

/// Build a sequence injector that stores the coerced values as an array
/// under `key`.
pub fn sequence_injector(
    key: impl Into<String>,
    kind: ValueKind,
) -> impl Fn(&mut JsonCommand, &[String]) -> Result<(), String> + Send + Sync + 'static {
    let key = key.into();
    move |target, raws| {
        let mut items = Vec::with_capacity(raws.len());
        for raw in raws {
            items.push(coerce(kind, raw)?);
        }
        target.insert(key.clone(), Value::Array(items));
        Ok(())
    }
}
