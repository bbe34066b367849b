#![forbid(unsafe_code)]

use kn_store::StoreError;
use serde_json::{Value, json};

pub(crate) fn format_store_error(err: &StoreError) -> String {
    match err {
        StoreError::Io(e) => format!("IO: {e}"),
        StoreError::Yaml(e) => format!("YAML: {e}"),
        StoreError::InvalidInput(msg) => format!("Invalid input: {msg}"),
        StoreError::InvalidBoard(msg) => format!("Invalid board file: {msg}"),
        StoreError::UnsupportedVersion(version) => {
            format!("Unsupported board version: {version}")
        }
        StoreError::BoardExists(path) => {
            format!("Board file already exists: {}", path.display())
        }
        StoreError::NotFound(name) => format!("File not found: {name}"),
        StoreError::UnknownTask(id) => format!("Task #{id} not found"),
        StoreError::UnknownColumn(name) => format!("Column not found: {name}"),
        StoreError::UnknownLabel(name) => format!("Label not found: {name}"),
        StoreError::UnknownSprint(name) => format!("Sprint not found: {name}"),
        StoreError::DuplicateColumn(name) => format!("Column already exists: {name}"),
        StoreError::DuplicateLabel(name) => format!("Label already exists: {name}"),
        StoreError::DuplicateSprint(name) => format!("Sprint already exists: {name}"),
    }
}

pub(crate) fn ai_ok(intent: &str, result: Value) -> Value {
    json!({
        "success": true,
        "intent": intent,
        "result": result,
        "error": null
    })
}

pub(crate) fn ai_error(code: &str, message: &str) -> Value {
    json!({
        "success": false,
        "intent": "error",
        "result": {},
        "error": { "code": code, "message": message.trim() }
    })
}

pub(crate) fn store_error(err: &StoreError) -> Value {
    ai_error("STORE_ERROR", &format_store_error(err))
}
