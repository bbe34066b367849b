#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical board shape for the current schema version.
///
/// Field names follow the on-disk wire format (camelCase where the file uses
/// camelCase), so a `Board` round-trips through YAML without aliases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: BTreeMap<u64, Task>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub sprints: Vec<Sprint>,
    pub metadata: Metadata,
    pub dates: BoardDates,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Empty string means "no column" (backlog).
    #[serde(default)]
    pub column: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(
        default,
        rename = "storyPoints",
        skip_serializing_if = "Option::is_none"
    )]
    pub story_points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
    pub dates: TaskDates,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sprint {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    pub dates: SprintDates,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "nextId")]
    pub next_id: u64,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardDates {
    pub created: String,
    pub updated: String,
    pub saved: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskDates {
    pub created: String,
    pub updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moved: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SprintDates {
    pub created: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends: Option<String>,
}

impl Board {
    /// Fresh board at the current schema version. All three date stamps start
    /// at `now`; `save_board` refreshes `dates.saved` on every write.
    pub fn new(name: impl Into<String>, description: Option<String>, columns: Vec<Column>) -> Self {
        let now = crate::clock::now_rfc3339();
        Self {
            name: name.into(),
            description,
            columns,
            tasks: BTreeMap::new(),
            labels: Vec::new(),
            sprints: Vec::new(),
            metadata: Metadata {
                next_id: 1,
                version: crate::BOARD_VERSION.to_string(),
            },
            dates: BoardDates {
                created: now.clone(),
                updated: now.clone(),
                saved: now,
            },
        }
    }

    pub fn touch_updated(&mut self) {
        self.dates.updated = crate::clock::now_rfc3339();
    }
}
