#![forbid(unsafe_code)]

use crate::tools::to_json;
use crate::{McpServer, ai_error, ai_ok, optional_f64, optional_string, require_string, store_error};
use kn_store::actions::sprint::{
    NewSprint, SprintPatch, add_sprint, list_sprints, remove_sprint, update_sprint,
};
use serde_json::{Value, json};

impl McpServer {
    pub(crate) fn tool_add_sprint(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let name = match require_string(args_obj, "name") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let sprint = NewSprint {
            name,
            description: match optional_string(args_obj, "description") {
                Ok(value) => value,
                Err(resp) => return resp,
            },
            capacity: match optional_f64(args_obj, "capacity") {
                Ok(value) => value,
                Err(resp) => return resp,
            },
            starts: match optional_string(args_obj, "starts") {
                Ok(value) => value,
                Err(resp) => return resp,
            },
            ends: match optional_string(args_obj, "ends") {
                Ok(value) => value,
                Err(resp) => return resp,
            },
        };
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match add_sprint(&path, sprint) {
            Ok(added) => ai_ok("add_sprint", json!({ "sprint": to_json(&added) })),
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_list_sprints(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match list_sprints(&path) {
            Ok(sprints) => ai_ok(
                "list_sprints",
                json!({ "count": sprints.len(), "sprints": to_json(&sprints) }),
            ),
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_update_sprint(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let current_name = match require_string(args_obj, "currentName") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let patch = SprintPatch {
            name: match optional_string(args_obj, "newName") {
                Ok(value) => value,
                Err(resp) => return resp,
            },
            description: match optional_string(args_obj, "description") {
                Ok(value) => value,
                Err(resp) => return resp,
            },
            capacity: match optional_f64(args_obj, "capacity") {
                Ok(value) => value,
                Err(resp) => return resp,
            },
            starts: match optional_string(args_obj, "starts") {
                Ok(value) => value,
                Err(resp) => return resp,
            },
            ends: match optional_string(args_obj, "ends") {
                Ok(value) => value,
                Err(resp) => return resp,
            },
        };
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match update_sprint(&path, &current_name, &patch) {
            Ok(updated) => ai_ok("update_sprint", json!({ "sprint": to_json(&updated) })),
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_remove_sprint(&mut self, args: Value) -> Value {
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
        match remove_sprint(&path, &name) {
            Ok(()) => ai_ok("remove_sprint", json!({ "removed": name })),
            Err(err) => store_error(&err),
        }
    }
}
