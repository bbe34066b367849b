#![forbid(unsafe_code)]

use crate::StoreError;
use kn_core::model::Board;
use kn_core::{BOARD_EXTENSION, clock};
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// Decode a board file at the current schema version.
pub fn load_board(path: &Path) -> Result<Board, StoreError> {
    let raw = std::fs::read_to_string(path)?;
    let board = serde_yaml::from_str(&raw)?;
    Ok(board)
}

/// Decode a board file into the loosely-typed intermediate form, without
/// assuming any schema version. Used by the migration path.
pub fn load_raw(path: &Path) -> Result<Value, StoreError> {
    let raw = std::fs::read_to_string(path)?;
    let value = serde_yaml::from_str(&raw)?;
    Ok(value)
}

/// Cheap name extraction for listings. Tolerates boards the full codec would
/// reject (old versions, partial files) by reading only the top-level `name`.
pub fn load_board_name(path: &Path) -> Result<Option<String>, StoreError> {
    let value = load_raw(path)?;
    Ok(value
        .get("name")
        .and_then(Value::as_str)
        .map(|name| name.to_string()))
}

/// Standard save path: stamp `dates.saved`, serialize, write.
pub fn save_board(path: &Path, board: &mut Board) -> Result<(), StoreError> {
    board.dates.saved = clock::now_rfc3339();
    let text = serde_yaml::to_string(board)?;
    std::fs::write(path, text)?;
    Ok(())
}

/// Every `*.knbn` file directly inside `dir`, sorted by file name so batch
/// reports enumerate in a stable order.
///
/// Matches on the name suffix rather than `Path::extension` so the default
/// `.knbn` file (no stem) is included too.
pub fn find_board_files(dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let suffix = format!(".{BOARD_EXTENSION}");
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if name.ends_with(&suffix) {
            files.push(path);
        }
    }
    files.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));
    Ok(files)
}
