#![forbid(unsafe_code)]

use crate::{StoreError, board_files};
use kn_core::model::{Board, Column};
use std::path::Path;

pub fn create_column(path: &Path, name: &str) -> Result<Board, StoreError> {
    let mut board = board_files::load_board(path)?;
    if board.columns.iter().any(|column| column.name == name) {
        return Err(StoreError::DuplicateColumn(name.to_string()));
    }
    board.columns.push(Column {
        name: name.to_string(),
    });
    board.touch_updated();
    board_files::save_board(path, &mut board)?;
    Ok(board)
}

/// Rename a column. Tasks referencing the old name follow the rename so they
/// stay attached to their column.
pub fn update_column(path: &Path, current_name: &str, new_name: &str) -> Result<Board, StoreError> {
    let mut board = board_files::load_board(path)?;
    if !board
        .columns
        .iter()
        .any(|column| column.name == current_name)
    {
        return Err(StoreError::UnknownColumn(current_name.to_string()));
    }
    if new_name != current_name && board.columns.iter().any(|column| column.name == new_name) {
        return Err(StoreError::DuplicateColumn(new_name.to_string()));
    }
    for column in &mut board.columns {
        if column.name == current_name {
            column.name = new_name.to_string();
        }
    }
    for task in board.tasks.values_mut() {
        if task.column == current_name {
            task.column = new_name.to_string();
        }
    }
    board.touch_updated();
    board_files::save_board(path, &mut board)?;
    Ok(board)
}

/// Remove a column. Tasks that were in it fall back to the backlog (empty
/// column name) rather than pointing at a column that no longer exists.
pub fn remove_column(path: &Path, name: &str) -> Result<Board, StoreError> {
    let mut board = board_files::load_board(path)?;
    if !board.columns.iter().any(|column| column.name == name) {
        return Err(StoreError::UnknownColumn(name.to_string()));
    }
    board.columns.retain(|column| column.name != name);
    for task in board.tasks.values_mut() {
        if task.column == name {
            task.column = String::new();
        }
    }
    board.touch_updated();
    board_files::save_board(path, &mut board)?;
    Ok(board)
}

/// Column listing with per-column task counts, in board order.
pub fn list_columns(path: &Path) -> Result<Vec<(String, usize)>, StoreError> {
    let board = board_files::load_board(path)?;
    Ok(board
        .columns
        .iter()
        .map(|column| {
            let count = board
                .tasks
                .values()
                .filter(|task| task.column == column.name)
                .count();
            (column.name.clone(), count)
        })
        .collect())
}
