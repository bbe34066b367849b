#![forbid(unsafe_code)]

use crate::StoreError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Byte-identical copy of `path` to `<path>.bak`, placed alongside the
/// original. No decoding happens here; the backup is valid no matter which
/// schema version the source file carries.
pub fn backup_board_file(path: &Path) -> Result<PathBuf, StoreError> {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    let backup_path = PathBuf::from(name);
    std::fs::copy(path, &backup_path)?;
    Ok(backup_path)
}
