#![forbid(unsafe_code)]

use crate::{StoreError, board_files};
use kn_core::clock;
use kn_core::model::{Task, TaskDates};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Clone, Debug, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub column: Option<String>,
    pub labels: Vec<String>,
    pub priority: Option<i64>,
    pub story_points: Option<f64>,
    pub sprint: Option<String>,
}

/// Partial task update; `Some` fields are applied, `None` fields are left
/// untouched.
#[derive(Clone, Debug, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub column: Option<String>,
    pub labels: Option<Vec<String>>,
    pub priority: Option<i64>,
    pub story_points: Option<f64>,
    pub sprint: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.column.is_none()
            && self.labels.is_none()
            && self.priority.is_none()
            && self.story_points.is_none()
            && self.sprint.is_none()
    }
}

/// Create a task with the board's next id and advance the counter.
pub fn create_task(path: &Path, new_task: NewTask) -> Result<Task, StoreError> {
    let mut board = board_files::load_board(path)?;
    let id = board.metadata.next_id;
    let now = clock::now_rfc3339();
    let task = Task {
        id,
        title: new_task.title,
        description: new_task.description,
        column: new_task.column.unwrap_or_default(),
        labels: new_task.labels,
        priority: new_task.priority,
        story_points: new_task.story_points,
        sprint: new_task.sprint,
        dates: TaskDates {
            created: now.clone(),
            updated: now,
            moved: None,
        },
    };
    board.tasks.insert(id, task.clone());
    board.metadata.next_id = id + 1;
    board.touch_updated();
    board_files::save_board(path, &mut board)?;
    Ok(task)
}

pub fn get_task(path: &Path, id: u64) -> Result<Task, StoreError> {
    let board = board_files::load_board(path)?;
    board
        .tasks
        .get(&id)
        .cloned()
        .ok_or(StoreError::UnknownTask(id))
}

/// Tasks in id order, optionally filtered by column and/or sprint.
pub fn list_tasks(
    path: &Path,
    column: Option<&str>,
    sprint: Option<&str>,
) -> Result<Vec<Task>, StoreError> {
    let board = board_files::load_board(path)?;
    Ok(board
        .tasks
        .into_values()
        .filter(|task| column.is_none_or(|column| task.column == column))
        .filter(|task| sprint.is_none_or(|sprint| task.sprint.as_deref() == Some(sprint)))
        .collect())
}

pub fn update_task(path: &Path, id: u64, patch: &TaskPatch) -> Result<Task, StoreError> {
    let mut board = board_files::load_board(path)?;
    let Some(task) = board.tasks.get_mut(&id) else {
        return Err(StoreError::UnknownTask(id));
    };
    apply_patch(task, patch);
    let updated = task.clone();
    board.touch_updated();
    board_files::save_board(path, &mut board)?;
    Ok(updated)
}

/// Apply several patches in one load/save cycle. Every id is checked before
/// anything is applied, so an unknown id fails the whole batch without a
/// partial write.
pub fn update_tasks_batch(
    path: &Path,
    patches: &BTreeMap<u64, TaskPatch>,
) -> Result<BTreeMap<u64, Task>, StoreError> {
    if patches.is_empty() {
        return Err(StoreError::InvalidInput("no task updates specified"));
    }
    let mut board = board_files::load_board(path)?;
    for id in patches.keys() {
        if !board.tasks.contains_key(id) {
            return Err(StoreError::UnknownTask(*id));
        }
    }
    let mut updated = BTreeMap::new();
    for (id, patch) in patches {
        let Some(task) = board.tasks.get_mut(id) else {
            return Err(StoreError::UnknownTask(*id));
        };
        apply_patch(task, patch);
        updated.insert(*id, task.clone());
    }
    board.touch_updated();
    board_files::save_board(path, &mut board)?;
    Ok(updated)
}

fn apply_patch(task: &mut Task, patch: &TaskPatch) {
    let now = clock::now_rfc3339();
    if let Some(title) = patch.title.as_deref() {
        task.title = title.to_string();
    }
    if let Some(description) = patch.description.as_deref() {
        task.description = Some(description.to_string());
    }
    if let Some(column) = patch.column.as_deref()
        && column != task.column
    {
        task.column = column.to_string();
        task.dates.moved = Some(now.clone());
    }
    if let Some(labels) = patch.labels.as_ref() {
        task.labels = labels.clone();
    }
    if let Some(priority) = patch.priority {
        task.priority = Some(priority);
    }
    if let Some(story_points) = patch.story_points {
        task.story_points = Some(story_points);
    }
    if let Some(sprint) = patch.sprint.as_deref() {
        task.sprint = Some(sprint.to_string());
    }
    task.dates.updated = now;
}
