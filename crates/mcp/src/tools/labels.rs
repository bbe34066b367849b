#![forbid(unsafe_code)]

use crate::tools::to_json;
use crate::{McpServer, ai_error, ai_ok, optional_string, require_string, store_error};
use kn_store::actions::label::{add_label, remove_label, update_label};
use kn_store::board_files;
use serde_json::{Value, json};

impl McpServer {
    pub(crate) fn tool_add_label(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let name = match require_string(args_obj, "name") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let color = match optional_string(args_obj, "color") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match add_label(&path, &name, color.as_deref()) {
            Ok(board) => ai_ok(
                "add_label",
                json!({ "label": name, "labels": to_json(&board.labels) }),
            ),
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_list_labels(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match board_files::load_board(&path) {
            Ok(board) => ai_ok("list_labels", json!({ "labels": to_json(&board.labels) })),
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_update_label(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let current_name = match require_string(args_obj, "currentName") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let new_name = match optional_string(args_obj, "newName") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let color = match optional_string(args_obj, "color") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        if new_name.is_none() && color.is_none() {
            return ai_error("INVALID_INPUT", "no label fields to update");
        }
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match update_label(&path, &current_name, new_name.as_deref(), color.as_deref()) {
            Ok(board) => ai_ok("update_label", json!({ "labels": to_json(&board.labels) })),
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_remove_label(&mut self, args: Value) -> Value {
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
        match remove_label(&path, &name) {
            Ok(board) => ai_ok(
                "remove_label",
                json!({ "removed": name, "labels": to_json(&board.labels) }),
            ),
            Err(err) => store_error(&err),
        }
    }
}
