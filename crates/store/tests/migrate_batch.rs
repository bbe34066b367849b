#![forbid(unsafe_code)]

use kn_store::board_files::load_board;
use kn_store::migrate::{MigrateOptions, MigrateStatus, migrate_boards};
use kn_store::StoreError;
use std::path::{Path, PathBuf};

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("kn_store_migrate_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

struct TempDir(PathBuf);

impl TempDir {
    fn new(test_name: &str) -> Self {
        Self(temp_dir(test_name))
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn write_legacy_board(dir: &Path, filename: &str) {
    let body = r#"configuration:
  name: Test Board
  description: Test board description
  columns:
    - To Do
    - In Progress
    - Done
tasks: {}
sprints: {}
metadata:
  nextId: 1
  version: "0.1"
  createdAt: "2024-01-01T00:00:00Z"
  lastModified: "2024-01-01T00:00:00Z"
"#;
    std::fs::write(dir.join(filename), body).expect("write legacy board");
}

fn write_current_board(dir: &Path, filename: &str) {
    let body = r#"name: Current Board
description: Already current
columns:
  - name: To Do
  - name: In Progress
  - name: Done
tasks: {}
labels: []
sprints: []
metadata:
  nextId: 1
  version: "0.2"
dates:
  created: "2024-01-01T00:00:00Z"
  updated: "2024-01-01T00:00:00Z"
  saved: "2024-01-01T00:00:00Z"
"#;
    std::fs::write(dir.join(filename), body).expect("write current board");
}

fn files_options(files: &[&str]) -> MigrateOptions {
    MigrateOptions {
        files: Some(files.iter().map(|name| name.to_string()).collect()),
        ..MigrateOptions::default()
    }
}

#[test]
fn migrates_single_legacy_file() {
    let dir = TempDir::new("single_legacy");
    write_legacy_board(dir.path(), "a.knbn");

    let report = migrate_boards(dir.path(), &files_options(&["a.knbn"])).expect("batch");

    assert_eq!(report.migrated_count, 1);
    assert_eq!(report.skipped_count, 0);
    assert_eq!(report.error_count, 0);
    assert_eq!(report.results.len(), 1);
    let result = &report.results[0];
    assert_eq!(result.status, MigrateStatus::Migrated);
    assert_eq!(result.filename, "a.knbn");
    assert_eq!(result.from_version.as_deref(), Some("0.1"));
    assert_eq!(result.to_version.as_deref(), Some("0.2"));

    let board = load_board(&dir.path().join("a.knbn")).expect("load migrated board");
    assert_eq!(board.metadata.version, "0.2");
    assert_eq!(board.name, "Test Board");
}

#[test]
fn skips_file_already_at_latest_version() {
    let dir = TempDir::new("skip_current");
    write_current_board(dir.path(), "current.knbn");
    let before = std::fs::read_to_string(dir.path().join("current.knbn")).expect("read");

    let report = migrate_boards(dir.path(), &files_options(&["current.knbn"])).expect("batch");

    assert_eq!(report.migrated_count, 0);
    assert_eq!(report.skipped_count, 1);
    assert_eq!(report.error_count, 0);
    let result = &report.results[0];
    assert_eq!(result.status, MigrateStatus::Skipped);
    assert!(result.message.contains("Already at latest version"));
    assert_eq!(result.from_version, result.to_version);

    // Skipped files are never rewritten, byte for byte.
    let after = std::fs::read_to_string(dir.path().join("current.knbn")).expect("read");
    assert_eq!(before, after);
    assert!(!dir.path().join("current.knbn.bak").exists());
}

#[test]
fn reports_missing_file_without_reading() {
    let dir = TempDir::new("missing_file");

    let report = migrate_boards(dir.path(), &files_options(&["missing.knbn"])).expect("batch");

    assert_eq!(report.error_count, 1);
    assert_eq!(report.results[0].status, MigrateStatus::Error);
    assert!(report.results[0].message.contains("File not found"));
    assert!(report.results[0].from_version.is_none());
    assert!(report.results[0].to_version.is_none());
}

#[test]
fn reports_undecodable_file_as_invalid_format() {
    let dir = TempDir::new("invalid_yaml");
    std::fs::write(dir.path().join("invalid.knbn"), "invalid: yaml: [content").expect("write");

    let report = migrate_boards(dir.path(), &files_options(&["invalid.knbn"])).expect("batch");

    assert_eq!(report.error_count, 1);
    assert!(
        report.results[0]
            .message
            .contains("Invalid board file format")
    );
}

#[test]
fn reports_file_without_version_metadata_as_invalid_format() {
    let dir = TempDir::new("no_version");
    std::fs::write(
        dir.path().join("no-version.knbn"),
        "name: No Version\ndescription: Missing version\n",
    )
    .expect("write");

    let report = migrate_boards(dir.path(), &files_options(&["no-version.knbn"])).expect("batch");

    assert_eq!(report.error_count, 1);
    assert!(
        report.results[0]
            .message
            .contains("Invalid board file format")
    );
}

#[test]
fn reports_unsupported_version_as_migration_failure() {
    let dir = TempDir::new("unsupported");
    std::fs::write(
        dir.path().join("bad.knbn"),
        "metadata:\n  version: \"999.0.0\"\n",
    )
    .expect("write");

    let report = migrate_boards(dir.path(), &files_options(&["bad.knbn"])).expect("batch");

    assert_eq!(report.error_count, 1);
    assert!(report.results[0].message.contains("Migration failed"));
    assert!(report.results[0].message.contains("999.0.0"));
}

#[test]
fn isolates_failures_per_file_in_input_order() {
    let dir = TempDir::new("isolation");
    write_legacy_board(dir.path(), "old.knbn");
    write_current_board(dir.path(), "current.knbn");
    std::fs::write(dir.path().join("invalid.knbn"), "invalid content").expect("write");

    let report = migrate_boards(
        dir.path(),
        &files_options(&["old.knbn", "current.knbn", "invalid.knbn", "nonexistent.knbn"]),
    )
    .expect("batch");

    assert_eq!(report.migrated_count, 1);
    assert_eq!(report.skipped_count, 1);
    assert_eq!(report.error_count, 2);
    assert_eq!(report.results.len(), 4);
    assert_eq!(report.results[0].status, MigrateStatus::Migrated);
    assert_eq!(report.results[1].status, MigrateStatus::Skipped);
    assert_eq!(report.results[2].status, MigrateStatus::Error);
    assert_eq!(report.results[3].status, MigrateStatus::Error);

    // A failing file in the middle must not stop later files from migrating.
    let board = load_board(&dir.path().join("old.knbn")).expect("load migrated board");
    assert_eq!(board.metadata.version, "0.2");
}

#[test]
fn count_invariant_holds_for_every_batch() {
    let dir = TempDir::new("count_invariant");
    write_legacy_board(dir.path(), "a.knbn");
    write_current_board(dir.path(), "b.knbn");

    let report = migrate_boards(
        dir.path(),
        &files_options(&["a.knbn", "b.knbn", "missing-1.knbn", "missing-2.knbn"]),
    )
    .expect("batch");

    assert_eq!(
        report.migrated_count + report.skipped_count + report.error_count,
        report.results.len()
    );
    assert_eq!(report.results.len(), 4);
}

#[test]
fn all_mode_processes_only_board_files() {
    let dir = TempDir::new("all_mode");
    write_legacy_board(dir.path(), "board1.knbn");
    write_legacy_board(dir.path(), "board2.knbn");
    write_current_board(dir.path(), "board3.knbn");
    std::fs::write(dir.path().join("readme.txt"), "not a board file").expect("write");

    let report = migrate_boards(
        dir.path(),
        &MigrateOptions {
            all: true,
            ..MigrateOptions::default()
        },
    )
    .expect("batch");

    assert_eq!(report.migrated_count, 2);
    assert_eq!(report.skipped_count, 1);
    assert_eq!(report.error_count, 0);
    let mut processed = report
        .results
        .iter()
        .map(|result| result.filename.clone())
        .collect::<Vec<_>>();
    processed.sort();
    assert_eq!(processed, vec!["board1.knbn", "board2.knbn", "board3.knbn"]);
}

#[test]
fn all_mode_over_empty_directory_yields_empty_report() {
    let dir = TempDir::new("all_empty");

    let report = migrate_boards(
        dir.path(),
        &MigrateOptions {
            all: true,
            ..MigrateOptions::default()
        },
    )
    .expect("batch");

    assert_eq!(report.migrated_count, 0);
    assert_eq!(report.skipped_count, 0);
    assert_eq!(report.error_count, 0);
    assert!(report.results.is_empty());
    assert!(report.summary.contains("No .knbn files found"));
}

#[test]
fn dry_run_reports_without_touching_disk() {
    let dir = TempDir::new("dry_run");
    write_legacy_board(dir.path(), "test.knbn");
    let before = std::fs::read_to_string(dir.path().join("test.knbn")).expect("read");

    let report = migrate_boards(
        dir.path(),
        &MigrateOptions {
            files: Some(vec!["test.knbn".to_string()]),
            dry_run: true,
            backup: true,
            ..MigrateOptions::default()
        },
    )
    .expect("batch");

    assert_eq!(report.migrated_count, 1);
    assert_eq!(report.results[0].status, MigrateStatus::Migrated);
    assert!(
        report.results[0]
            .message
            .contains("Would migrate from 0.1 to 0.2")
    );
    assert!(report.summary.contains("Would migrate: 1 files"));
    assert!(
        report
            .summary
            .contains("Run without dryRun to perform the migration")
    );

    // Simulation purity: no bytes changed and no backup appeared, even with
    // the backup flag set.
    let after = std::fs::read_to_string(dir.path().join("test.knbn")).expect("read");
    assert_eq!(before, after);
    assert!(!dir.path().join("test.knbn.bak").exists());
    assert!(!report.results[0].backup_created);
}

#[test]
fn backup_preserves_original_bytes_before_overwrite() {
    let dir = TempDir::new("backup");
    write_legacy_board(dir.path(), "test.knbn");
    let original = std::fs::read_to_string(dir.path().join("test.knbn")).expect("read");

    let report = migrate_boards(
        dir.path(),
        &MigrateOptions {
            files: Some(vec!["test.knbn".to_string()]),
            backup: true,
            ..MigrateOptions::default()
        },
    )
    .expect("batch");

    assert_eq!(report.migrated_count, 1);
    assert!(report.results[0].backup_created);

    let backup = std::fs::read_to_string(dir.path().join("test.knbn.bak")).expect("read backup");
    assert_eq!(backup, original);

    let board = load_board(&dir.path().join("test.knbn")).expect("load migrated board");
    assert_eq!(board.metadata.version, "0.2");
}

#[test]
fn no_backup_without_flag() {
    let dir = TempDir::new("no_backup");
    write_legacy_board(dir.path(), "test.knbn");

    let report = migrate_boards(dir.path(), &files_options(&["test.knbn"])).expect("batch");

    assert_eq!(report.migrated_count, 1);
    assert!(!report.results[0].backup_created);
    assert!(!dir.path().join("test.knbn.bak").exists());
}

#[test]
fn neither_files_nor_all_is_a_configuration_error() {
    let dir = TempDir::new("config_error");

    let err = migrate_boards(dir.path(), &MigrateOptions::default()).expect_err("must refuse");
    assert!(matches!(err, StoreError::InvalidInput(_)));
    assert!(err.to_string().contains("files array or all flag"));
}

#[test]
fn summary_lists_counts_and_errors() {
    let dir = TempDir::new("summary");
    write_legacy_board(dir.path(), "a.knbn");

    let ok_report = migrate_boards(dir.path(), &files_options(&["a.knbn"])).expect("batch");
    assert!(ok_report.summary.contains("Migration Summary:"));
    assert!(ok_report.summary.contains("Migrated: 1 files"));
    assert!(ok_report.summary.contains("Already current: 0 files"));
    assert!(!ok_report.summary.contains("Errors:"));

    let err_report = migrate_boards(dir.path(), &files_options(&["gone.knbn"])).expect("batch");
    assert!(err_report.summary.contains("Errors: 1 files"));
}

#[test]
fn migrating_twice_is_idempotent() {
    let dir = TempDir::new("idempotent");
    write_legacy_board(dir.path(), "a.knbn");

    let first = migrate_boards(dir.path(), &files_options(&["a.knbn"])).expect("batch");
    assert_eq!(first.migrated_count, 1);

    let bytes_after_first = std::fs::read_to_string(dir.path().join("a.knbn")).expect("read");
    let second = migrate_boards(
        dir.path(),
        &MigrateOptions {
            files: Some(vec!["a.knbn".to_string()]),
            backup: true,
            ..MigrateOptions::default()
        },
    )
    .expect("batch");

    assert_eq!(second.migrated_count, 0);
    assert_eq!(second.skipped_count, 1);
    let bytes_after_second = std::fs::read_to_string(dir.path().join("a.knbn")).expect("read");
    assert_eq!(bytes_after_first, bytes_after_second);
    assert!(!dir.path().join("a.knbn.bak").exists());
}
