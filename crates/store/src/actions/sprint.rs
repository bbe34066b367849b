#![forbid(unsafe_code)]

use crate::{StoreError, board_files};
use kn_core::clock;
use kn_core::model::{Sprint, SprintDates};
use std::path::Path;

#[derive(Clone, Debug, Default)]
pub struct NewSprint {
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<f64>,
    pub starts: Option<String>,
    pub ends: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct SprintPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<f64>,
    pub starts: Option<String>,
    pub ends: Option<String>,
}

pub fn add_sprint(path: &Path, sprint: NewSprint) -> Result<Sprint, StoreError> {
    let mut board = board_files::load_board(path)?;
    if board.sprints.iter().any(|entry| entry.name == sprint.name) {
        return Err(StoreError::DuplicateSprint(sprint.name));
    }
    let added = Sprint {
        name: sprint.name,
        description: sprint.description,
        capacity: sprint.capacity,
        dates: SprintDates {
            created: clock::now_rfc3339(),
            starts: sprint.starts,
            ends: sprint.ends,
        },
    };
    board.sprints.push(added.clone());
    board.touch_updated();
    board_files::save_board(path, &mut board)?;
    Ok(added)
}

pub fn update_sprint(path: &Path, name: &str, patch: &SprintPatch) -> Result<Sprint, StoreError> {
    let mut board = board_files::load_board(path)?;
    if let Some(new_name) = patch.name.as_deref()
        && new_name != name
        && board.sprints.iter().any(|entry| entry.name == new_name)
    {
        return Err(StoreError::DuplicateSprint(new_name.to_string()));
    }
    let Some(sprint) = board.sprints.iter_mut().find(|entry| entry.name == name) else {
        return Err(StoreError::UnknownSprint(name.to_string()));
    };
    if let Some(new_name) = patch.name.as_deref() {
        sprint.name = new_name.to_string();
    }
    if let Some(description) = patch.description.as_deref() {
        sprint.description = Some(description.to_string());
    }
    if let Some(capacity) = patch.capacity {
        sprint.capacity = Some(capacity);
    }
    if let Some(starts) = patch.starts.as_deref() {
        sprint.dates.starts = Some(starts.to_string());
    }
    if let Some(ends) = patch.ends.as_deref() {
        sprint.dates.ends = Some(ends.to_string());
    }
    let updated = sprint.clone();
    board.touch_updated();
    board_files::save_board(path, &mut board)?;
    Ok(updated)
}

pub fn remove_sprint(path: &Path, name: &str) -> Result<(), StoreError> {
    let mut board = board_files::load_board(path)?;
    if !board.sprints.iter().any(|entry| entry.name == name) {
        return Err(StoreError::UnknownSprint(name.to_string()));
    }
    board.sprints.retain(|entry| entry.name != name);
    board.touch_updated();
    board_files::save_board(path, &mut board)?;
    Ok(())
}

pub fn list_sprints(path: &Path) -> Result<Vec<Sprint>, StoreError> {
    let board = board_files::load_board(path)?;
    Ok(board.sprints)
}
