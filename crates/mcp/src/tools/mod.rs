#![forbid(unsafe_code)]

mod board;
mod columns;
mod definitions;
mod dispatch;
mod labels;
mod sprints;
mod tasks;

pub(crate) use definitions::tool_definitions;
pub(crate) use dispatch::dispatch_tool;

use serde::Serialize;
use serde_json::Value;

/// Serialize a store/model value into a JSON response payload.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
