#![forbid(unsafe_code)]

use crate::ai_error;
use serde_json::{Map, Value};

pub(crate) fn require_string(args: &Map<String, Value>, key: &str) -> Result<String, Value> {
    match args.get(key) {
        Some(Value::String(value)) if !value.trim().is_empty() => Ok(value.clone()),
        Some(Value::String(_)) => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must not be empty"),
        )),
        Some(_) => Err(ai_error("INVALID_INPUT", &format!("{key} must be a string"))),
        None => Err(ai_error("INVALID_INPUT", &format!("{key} is required"))),
    }
}

pub(crate) fn optional_string(
    args: &Map<String, Value>,
    key: &str,
) -> Result<Option<String>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ai_error("INVALID_INPUT", &format!("{key} must be a string"))),
    }
}

pub(crate) fn optional_bool(args: &Map<String, Value>, key: &str) -> Result<bool, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(value)) => Ok(*value),
        Some(_) => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be a boolean"),
        )),
    }
}

pub(crate) fn require_u64(args: &Map<String, Value>, key: &str) -> Result<u64, Value> {
    match args.get(key).and_then(Value::as_u64) {
        Some(value) => Ok(value),
        None => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be a non-negative integer"),
        )),
    }
}

pub(crate) fn optional_i64(args: &Map<String, Value>, key: &str) -> Result<Option<i64>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_i64().map(Some).ok_or_else(|| {
            ai_error("INVALID_INPUT", &format!("{key} must be an integer"))
        }),
    }
}

pub(crate) fn optional_f64(args: &Map<String, Value>, key: &str) -> Result<Option<f64>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            ai_error("INVALID_INPUT", &format!("{key} must be a number"))
        }),
    }
}

pub(crate) fn optional_string_array(
    args: &Map<String, Value>,
    key: &str,
) -> Result<Option<Vec<String>>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                let Some(text) = item.as_str() else {
                    return Err(ai_error(
                        "INVALID_INPUT",
                        &format!("{key} items must be strings"),
                    ));
                };
                out.push(text.to_string());
            }
            Ok(Some(out))
        }
        Some(_) => Err(ai_error("INVALID_INPUT", &format!("{key} must be an array"))),
    }
}
