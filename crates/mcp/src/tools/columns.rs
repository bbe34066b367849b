#![forbid(unsafe_code)]

use crate::{McpServer, ai_error, ai_ok, optional_string, require_string, store_error};
use kn_store::actions::column::{create_column, list_columns, remove_column, update_column};
use serde_json::{Value, json};

impl McpServer {
    pub(crate) fn tool_create_column(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let name = match require_string(args_obj, "name") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match create_column(&path, &name) {
            Ok(board) => ai_ok(
                "create_column",
                json!({ "column": name, "columns": column_names(&board) }),
            ),
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_list_columns(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match list_columns(&path) {
            Ok(columns) => {
                let listed = columns
                    .iter()
                    .map(|(name, count)| json!({ "name": name, "taskCount": count }))
                    .collect::<Vec<_>>();
                ai_ok("list_columns", json!({ "columns": listed }))
            }
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_update_column(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let current_name = match require_string(args_obj, "currentName") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let new_name = match require_string(args_obj, "newName") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match update_column(&path, &current_name, &new_name) {
            Ok(board) => ai_ok(
                "update_column",
                json!({ "column": new_name, "columns": column_names(&board) }),
            ),
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_remove_column(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let name = match require_string(args_obj, "name") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match remove_column(&path, &name) {
            Ok(board) => ai_ok(
                "remove_column",
                json!({ "removed": name, "columns": column_names(&board) }),
            ),
            Err(err) => store_error(&err),
        }
    }
}

fn column_names(board: &kn_core::model::Board) -> Vec<String> {
    board
        .columns
        .iter()
        .map(|column| column.name.clone())
        .collect()
}
