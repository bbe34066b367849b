#![forbid(unsafe_code)]

use crate::BOARD_VERSION;
use crate::model::Board;
use serde_yaml::{Mapping, Value};

/// Failure modes of version detection and chain traversal.
///
/// `Malformed` covers everything that makes a document unusable as input
/// (undecodable bytes, missing metadata, a shape violation inside a step);
/// `UnsupportedVersion` means the document is well-formed but no registered
/// step leads from its version to [`BOARD_VERSION`].
#[derive(Debug)]
pub enum MigrationError {
    Malformed(String),
    UnsupportedVersion(String),
}

impl std::fmt::Display for MigrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "malformed board document: {message}"),
            Self::UnsupportedVersion(version) => {
                write!(f, "unsupported board version: {version}")
            }
        }
    }
}

impl std::error::Error for MigrationError {}

/// One registered transformation from a source version to its successor.
///
/// Steps are pure: they read the input value and build a fresh output value,
/// so a failing step can never leave a half-migrated document behind.
type MigrationStep = fn(&Value) -> Result<Value, MigrationError>;

/// Registry keyed by source version. Adding a schema version means adding one
/// entry here and bumping [`BOARD_VERSION`]; detector and orchestrator stay
/// untouched.
const MIGRATIONS: &[(&str, &str, MigrationStep)] = &[("0.1", "0.2", migrate_0_1_to_0_2)];

/// Extract the declared schema version of a loosely-typed decoded document.
///
/// Absence of the `metadata` mapping or of `metadata.version` is a distinct
/// outcome from "old version" and must be rejected before any step runs.
pub fn detect_version(raw: &Value) -> Result<String, MigrationError> {
    let Some(root) = raw.as_mapping() else {
        return Err(MigrationError::Malformed(
            "document is not a mapping".to_string(),
        ));
    };
    let Some(metadata) = root.get("metadata").and_then(Value::as_mapping) else {
        return Err(MigrationError::Malformed(
            "missing metadata mapping".to_string(),
        ));
    };
    match metadata.get("version") {
        Some(Value::String(version)) => Ok(version.clone()),
        Some(Value::Number(version)) => Ok(version.to_string()),
        _ => Err(MigrationError::Malformed(
            "missing metadata.version".to_string(),
        )),
    }
}

/// Walk the registered chain until the document reaches [`BOARD_VERSION`],
/// then decode it into the canonical [`Board`].
///
/// Callers are expected to short-circuit documents that are already current;
/// invoking the chain on one is harmless (it decodes immediately) but the
/// orchestrator never does so.
pub fn migrate_board(raw: Value) -> Result<Board, MigrationError> {
    let mut value = raw;
    loop {
        let version = detect_version(&value)?;
        if version == BOARD_VERSION {
            return serde_yaml::from_value(value).map_err(|err| {
                MigrationError::Malformed(format!(
                    "document does not conform to schema {BOARD_VERSION}: {err}"
                ))
            });
        }
        let Some((_, _, step)) = MIGRATIONS.iter().find(|(from, _, _)| *from == version) else {
            return Err(MigrationError::UnsupportedVersion(version));
        };
        value = step(&value)?;
    }
}

/// 0.1 → 0.2: lift `configuration.{name,description,columns}` to the top
/// level, turn flat column names into `{ name }` descriptors, turn the
/// sprints mapping into a list, add the empty labels list, and split the old
/// metadata timestamps into the `dates` block. `dates.saved` is seeded from
/// the last-modified stamp; the save path refreshes it on write.
fn migrate_0_1_to_0_2(raw: &Value) -> Result<Value, MigrationError> {
    let configuration = raw
        .get("configuration")
        .and_then(Value::as_mapping)
        .ok_or_else(|| MigrationError::Malformed("0.1: missing configuration".to_string()))?;
    let name = configuration
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| MigrationError::Malformed("0.1: missing configuration.name".to_string()))?;
    let metadata = raw
        .get("metadata")
        .and_then(Value::as_mapping)
        .ok_or_else(|| MigrationError::Malformed("0.1: missing metadata".to_string()))?;

    let mut columns = Vec::new();
    if let Some(flat) = configuration.get("columns").and_then(Value::as_sequence) {
        for entry in flat {
            let Some(column_name) = entry.as_str() else {
                return Err(MigrationError::Malformed(
                    "0.1: configuration.columns entries must be strings".to_string(),
                ));
            };
            let mut column = Mapping::new();
            column.insert(
                Value::String("name".to_string()),
                Value::String(column_name.to_string()),
            );
            columns.push(Value::Mapping(column));
        }
    }

    let mut tasks = Mapping::new();
    if let Some(old_tasks) = raw.get("tasks").and_then(Value::as_mapping) {
        for (key, task) in old_tasks {
            tasks.insert(normalize_task_id(key)?, task.clone());
        }
    }

    // 0.1 kept sprints in a mapping keyed by name; 0.2 keeps an ordered list.
    let mut sprints = Vec::new();
    match raw.get("sprints") {
        Some(Value::Mapping(old_sprints)) => {
            for (_, sprint) in old_sprints {
                sprints.push(sprint.clone());
            }
        }
        Some(Value::Sequence(old_sprints)) => sprints.extend(old_sprints.iter().cloned()),
        _ => {}
    }

    let created = metadata
        .get("createdAt")
        .and_then(Value::as_str)
        .unwrap_or("1970-01-01T00:00:00Z")
        .to_string();
    let updated = metadata
        .get("lastModified")
        .and_then(Value::as_str)
        .unwrap_or(created.as_str())
        .to_string();
    let next_id = metadata.get("nextId").and_then(Value::as_u64).unwrap_or(1);

    let mut out = Mapping::new();
    out.insert(
        Value::String("name".to_string()),
        Value::String(name.to_string()),
    );
    if let Some(description) = configuration.get("description").and_then(Value::as_str) {
        out.insert(
            Value::String("description".to_string()),
            Value::String(description.to_string()),
        );
    }
    out.insert(
        Value::String("columns".to_string()),
        Value::Sequence(columns),
    );
    out.insert(Value::String("tasks".to_string()), Value::Mapping(tasks));
    out.insert(
        Value::String("labels".to_string()),
        Value::Sequence(Vec::new()),
    );
    out.insert(
        Value::String("sprints".to_string()),
        Value::Sequence(sprints),
    );

    let mut new_metadata = Mapping::new();
    new_metadata.insert(
        Value::String("nextId".to_string()),
        Value::Number(next_id.into()),
    );
    new_metadata.insert(
        Value::String("version".to_string()),
        Value::String("0.2".to_string()),
    );
    out.insert(
        Value::String("metadata".to_string()),
        Value::Mapping(new_metadata),
    );

    let mut dates = Mapping::new();
    dates.insert(Value::String("created".to_string()), Value::String(created));
    dates.insert(
        Value::String("updated".to_string()),
        Value::String(updated.clone()),
    );
    dates.insert(Value::String("saved".to_string()), Value::String(updated));
    out.insert(Value::String("dates".to_string()), Value::Mapping(dates));

    Ok(Value::Mapping(out))
}

/// Task ids arrive as YAML numbers, or as strings when the file was written
/// as JSON (JSON object keys are always strings).
fn normalize_task_id(key: &Value) -> Result<Value, MigrationError> {
    match key {
        Value::Number(id) if id.as_u64().is_some() => Ok(key.clone()),
        Value::String(id) => match id.parse::<u64>() {
            Ok(parsed) => Ok(Value::Number(parsed.into())),
            Err(_) => Err(MigrationError::Malformed(format!(
                "0.1: task id is not numeric: {id}"
            ))),
        },
        _ => Err(MigrationError::Malformed(
            "0.1: task id is not numeric".to_string(),
        )),
    }
}
