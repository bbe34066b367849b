#![forbid(unsafe_code)]

use crate::{StoreError, backup, board_files};
use kn_core::migrations::{MigrationError, detect_version, migrate_board};
use kn_core::{BOARD_EXTENSION, BOARD_VERSION};
use serde_yaml::Value;
use std::path::Path;

/// Batch invocation parameters. Exactly one of `files` / `all` must be
/// selected; `dry_run` computes outcomes without touching the filesystem and
/// `backup` copies originals aside before a real overwrite.
#[derive(Clone, Debug, Default)]
pub struct MigrateOptions {
    pub files: Option<Vec<String>>,
    pub all: bool,
    pub dry_run: bool,
    pub backup: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MigrateStatus {
    Migrated,
    Skipped,
    Error,
}

impl MigrateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Migrated => "migrated",
            Self::Skipped => "skipped",
            Self::Error => "error",
        }
    }
}

/// One record per processed file, immutable once pushed into the report.
/// `from_version`/`to_version` are present together or absent together.
#[derive(Clone, Debug)]
pub struct FileMigrationResult {
    pub filename: String,
    pub status: MigrateStatus,
    pub from_version: Option<String>,
    pub to_version: Option<String>,
    pub message: String,
    pub backup_created: bool,
}

/// Aggregate outcome of one batch call. `migrated + skipped + errors` always
/// equals the number of files resolved for processing.
#[derive(Clone, Debug, Default)]
pub struct MigrateReport {
    pub migrated_count: usize,
    pub skipped_count: usize,
    pub error_count: usize,
    pub results: Vec<FileMigrationResult>,
    pub summary: String,
}

impl MigrateReport {
    fn push(&mut self, result: FileMigrationResult) {
        match result.status {
            MigrateStatus::Migrated => self.migrated_count += 1,
            MigrateStatus::Skipped => self.skipped_count += 1,
            MigrateStatus::Error => self.error_count += 1,
        }
        self.results.push(result);
    }
}

/// Migrate board files under `working_dir` to the current schema version.
///
/// Processing is sequential and per-file isolated: any failure on one file
/// (missing, undecodable, unsupported version, backup or write error) becomes
/// that file's `error` result and the batch moves on. The only failure that
/// escapes the call is the configuration error for selecting neither an
/// explicit file list nor `all`.
pub fn migrate_boards(
    working_dir: &Path,
    options: &MigrateOptions,
) -> Result<MigrateReport, StoreError> {
    let explicit = options
        .files
        .as_ref()
        .is_some_and(|files| !files.is_empty());
    if !explicit && !options.all {
        return Err(StoreError::InvalidInput(
            "either files array or all flag must be specified",
        ));
    }

    let mut report = MigrateReport::default();

    let filenames = if options.all {
        let found = board_files::find_board_files(working_dir)?;
        if found.is_empty() {
            report.summary = format!("No .{BOARD_EXTENSION} files found in current directory");
            return Ok(report);
        }
        found
            .into_iter()
            .map(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string_lossy().into_owned())
            })
            .collect()
    } else {
        options.files.clone().unwrap_or_default()
    };

    for filename in &filenames {
        report.push(migrate_one(working_dir, filename, options));
    }

    report.summary = render_summary(&report, options.dry_run);
    Ok(report)
}

fn migrate_one(working_dir: &Path, filename: &str, options: &MigrateOptions) -> FileMigrationResult {
    let error = |message: String| FileMigrationResult {
        filename: filename.to_string(),
        status: MigrateStatus::Error,
        from_version: None,
        to_version: None,
        message,
        backup_created: false,
    };

    let path = working_dir.join(filename);
    if !path.exists() {
        return error(format!("File not found: {filename}"));
    }

    let raw: Value = match board_files::load_raw(&path) {
        Ok(value) => value,
        Err(_) => return error(format!("Invalid board file format: {filename}")),
    };
    let from_version = match detect_version(&raw) {
        Ok(version) => version,
        Err(MigrationError::Malformed(_)) => {
            return error(format!("Invalid board file format: {filename}"));
        }
        Err(err) => return error(format!("Migration failed - {err}")),
    };

    // Idempotence guard: a current file is never rewritten and never backed
    // up, regardless of flags.
    if from_version == BOARD_VERSION {
        return FileMigrationResult {
            filename: filename.to_string(),
            status: MigrateStatus::Skipped,
            from_version: Some(from_version.clone()),
            to_version: Some(from_version),
            message: format!("Already at latest version ({BOARD_VERSION})"),
            backup_created: false,
        };
    }

    let mut board = match migrate_board(raw) {
        Ok(board) => board,
        Err(err) => return error(format!("Migration failed - {err}")),
    };
    let to_version = board.metadata.version.clone();

    if options.dry_run {
        return FileMigrationResult {
            filename: filename.to_string(),
            status: MigrateStatus::Migrated,
            from_version: Some(from_version.clone()),
            to_version: Some(to_version.clone()),
            message: format!("Would migrate from {from_version} to {to_version}"),
            backup_created: false,
        };
    }

    let mut backup_created = false;
    if options.backup {
        if let Err(err) = backup::backup_board_file(&path) {
            return error(format!("Migration failed - {err}"));
        }
        backup_created = true;
    }

    if let Err(err) = board_files::save_board(&path, &mut board) {
        return error(format!("Migration failed - {err}"));
    }

    FileMigrationResult {
        filename: filename.to_string(),
        status: MigrateStatus::Migrated,
        from_version: Some(from_version.clone()),
        to_version: Some(to_version.clone()),
        message: format!("Migrated from {from_version} to {to_version}"),
        backup_created,
    }
}

fn render_summary(report: &MigrateReport, dry_run: bool) -> String {
    let mut summary = String::from("Migration Summary:\n");
    if dry_run {
        summary.push_str(&format!(
            "  Would migrate: {} files\n",
            report.migrated_count
        ));
    } else {
        summary.push_str(&format!("  Migrated: {} files\n", report.migrated_count));
    }
    summary.push_str(&format!("  Already current: {} files", report.skipped_count));
    if report.error_count > 0 {
        summary.push_str(&format!("\n  Errors: {} files", report.error_count));
    }
    if dry_run && report.migrated_count > 0 {
        summary.push_str("\n\nRun without dryRun to perform the migration.");
    }
    summary
}
