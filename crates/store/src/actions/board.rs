#![forbid(unsafe_code)]

use crate::{StoreError, board_files};
use kn_core::BOARD_EXTENSION;
use kn_core::model::{Board, Column};
use std::path::Path;

/// Create a new board file at `path`. Refuses to clobber an existing file.
pub fn create_board(
    path: &Path,
    name: &str,
    description: Option<&str>,
) -> Result<Board, StoreError> {
    if path.exists() {
        return Err(StoreError::BoardExists(path.to_path_buf()));
    }
    let mut board = Board::new(
        name,
        description.map(|text| text.to_string()),
        default_columns(),
    );
    board_files::save_board(path, &mut board)?;
    Ok(board)
}

fn default_columns() -> Vec<Column> {
    ["To Do", "In Progress", "Done"]
        .into_iter()
        .map(|name| Column {
            name: name.to_string(),
        })
        .collect()
}

/// Derive a board file name from a board name: lowercase, runs of
/// non-alphanumeric characters collapsed to a single dash.
pub fn filename_from_board_name(name: &str) -> String {
    let mut slug = String::new();
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        format!(".{BOARD_EXTENSION}")
    } else {
        format!("{slug}.{BOARD_EXTENSION}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugifies_board_names() {
        assert_eq!(filename_from_board_name("My Board"), "my-board.knbn");
        assert_eq!(filename_from_board_name("Q3 / Infra!"), "q3-infra.knbn");
        assert_eq!(filename_from_board_name("***"), ".knbn");
    }
}
