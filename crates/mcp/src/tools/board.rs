#![forbid(unsafe_code)]

use crate::tools::to_json;
use crate::{
    McpServer, ai_error, ai_ok, optional_bool, optional_string, optional_string_array,
    require_string, store_error,
};
use kn_store::actions::board::{create_board, filename_from_board_name};
use kn_store::migrate::{MigrateOptions, migrate_boards};
use kn_store::{board_files, migrate};
use serde_json::{Value, json};

impl McpServer {
    pub(crate) fn tool_create_board(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let name = match require_string(args_obj, "name") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let description = match optional_string(args_obj, "description") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value.unwrap_or_else(|| filename_from_board_name(&name)),
            Err(resp) => return resp,
        };

        let path = self.board_path(Some(&filename));
        match create_board(&path, &name, description.as_deref()) {
            Ok(board) => ai_ok(
                "create_board",
                json!({ "filename": filename, "board": to_json(&board) }),
            ),
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_get_board(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match board_files::load_board(&path) {
            Ok(board) => ai_ok("get_board", json!({ "board": to_json(&board) })),
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_list_boards(&mut self, _args: Value) -> Value {
        let files = match board_files::find_board_files(&self.working_dir) {
            Ok(files) => files,
            Err(err) => return store_error(&err),
        };

        let mut boards = Vec::with_capacity(files.len());
        for path in files {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned());
            // Name extraction is best-effort so listings still include files
            // that are at an old schema version or partially written.
            let name = board_files::load_board_name(&path).ok().flatten();
            boards.push(json!({ "filename": filename, "name": name }));
        }
        ai_ok("list_boards", json!({ "boards": boards }))
    }

    pub(crate) fn tool_migrate(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let files = match optional_string_array(args_obj, "files") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let all = match optional_bool(args_obj, "all") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let dry_run = match optional_bool(args_obj, "dryRun") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let backup = match optional_bool(args_obj, "backup") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let options = MigrateOptions {
            files,
            all,
            dry_run,
            backup,
        };
        match migrate_boards(&self.working_dir, &options) {
            Ok(report) => ai_ok("migrate", render_migrate_report(&report)),
            Err(err) => store_error(&err),
        }
    }
}

fn render_migrate_report(report: &migrate::MigrateReport) -> Value {
    let results = report
        .results
        .iter()
        .map(|result| {
            json!({
                "filename": result.filename,
                "status": result.status.as_str(),
                "fromVersion": result.from_version,
                "toVersion": result.to_version,
                "message": result.message,
                "backupCreated": result.backup_created,
            })
        })
        .collect::<Vec<_>>();

    json!({
        "migratedCount": report.migrated_count,
        "skippedCount": report.skipped_count,
        "errorCount": report.error_count,
        "results": results,
        "summary": report.summary,
    })
}
