#![forbid(unsafe_code)]

use kn_core::migrations::MigrationError;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    /// Call-level misuse (e.g. a batch invoked with neither a file list nor
    /// the all-files flag). The only error a batch call refuses to absorb.
    InvalidInput(&'static str),
    InvalidBoard(String),
    UnsupportedVersion(String),
    BoardExists(PathBuf),
    NotFound(String),
    UnknownTask(u64),
    UnknownColumn(String),
    UnknownLabel(String),
    UnknownSprint(String),
    DuplicateColumn(String),
    DuplicateLabel(String),
    DuplicateSprint(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Yaml(err) => write!(f, "yaml: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::InvalidBoard(message) => write!(f, "invalid board file: {message}"),
            Self::UnsupportedVersion(version) => {
                write!(f, "unsupported board version: {version}")
            }
            Self::BoardExists(path) => {
                write!(f, "board file already exists: {}", path.display())
            }
            Self::NotFound(name) => write!(f, "file not found: {name}"),
            Self::UnknownTask(id) => write!(f, "unknown task: #{id}"),
            Self::UnknownColumn(name) => write!(f, "unknown column: {name}"),
            Self::UnknownLabel(name) => write!(f, "unknown label: {name}"),
            Self::UnknownSprint(name) => write!(f, "unknown sprint: {name}"),
            Self::DuplicateColumn(name) => write!(f, "column already exists: {name}"),
            Self::DuplicateLabel(name) => write!(f, "label already exists: {name}"),
            Self::DuplicateSprint(name) => write!(f, "sprint already exists: {name}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_yaml::Error> for StoreError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

impl From<MigrationError> for StoreError {
    fn from(value: MigrationError) -> Self {
        match value {
            MigrationError::Malformed(message) => Self::InvalidBoard(message),
            MigrationError::UnsupportedVersion(version) => Self::UnsupportedVersion(version),
        }
    }
}
