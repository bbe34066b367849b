#![forbid(unsafe_code)]

use crate::{StoreError, board_files};
use kn_core::model::{Board, Label};
use std::path::Path;

pub fn add_label(path: &Path, name: &str, color: Option<&str>) -> Result<Board, StoreError> {
    let mut board = board_files::load_board(path)?;
    if board.labels.iter().any(|label| label.name == name) {
        return Err(StoreError::DuplicateLabel(name.to_string()));
    }
    board.labels.push(Label {
        name: name.to_string(),
        color: color.map(|color| color.to_string()),
    });
    board.touch_updated();
    board_files::save_board(path, &mut board)?;
    Ok(board)
}

pub fn update_label(
    path: &Path,
    current_name: &str,
    new_name: Option<&str>,
    color: Option<&str>,
) -> Result<Board, StoreError> {
    let mut board = board_files::load_board(path)?;
    if !board.labels.iter().any(|label| label.name == current_name) {
        return Err(StoreError::UnknownLabel(current_name.to_string()));
    }
    if let Some(new_name) = new_name
        && new_name != current_name
        && board.labels.iter().any(|label| label.name == new_name)
    {
        return Err(StoreError::DuplicateLabel(new_name.to_string()));
    }
    for label in &mut board.labels {
        if label.name == current_name {
            if let Some(new_name) = new_name {
                label.name = new_name.to_string();
            }
            if let Some(color) = color {
                label.color = Some(color.to_string());
            }
        }
    }
    board.touch_updated();
    board_files::save_board(path, &mut board)?;
    Ok(board)
}

pub fn remove_label(path: &Path, name: &str) -> Result<Board, StoreError> {
    let mut board = board_files::load_board(path)?;
    if !board.labels.iter().any(|label| label.name == name) {
        return Err(StoreError::UnknownLabel(name.to_string()));
    }
    board.labels.retain(|label| label.name != name);
    board.touch_updated();
    board_files::save_board(path, &mut board)?;
    Ok(board)
}

pub fn get_label(path: &Path, name: &str) -> Result<Label, StoreError> {
    let board = board_files::load_board(path)?;
    board
        .labels
        .into_iter()
        .find(|label| label.name == name)
        .ok_or_else(|| StoreError::UnknownLabel(name.to_string()))
}
