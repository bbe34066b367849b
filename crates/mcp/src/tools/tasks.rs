#![forbid(unsafe_code)]

use crate::tools::to_json;
use crate::{
    McpServer, ai_error, ai_ok, optional_f64, optional_i64, optional_string,
    optional_string_array, require_string, require_u64, store_error,
};
use kn_store::actions::task::{
    NewTask, TaskPatch, create_task, get_task, list_tasks, update_task, update_tasks_batch,
};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

impl McpServer {
    pub(crate) fn tool_create_task(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let title = match require_string(args_obj, "title") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let new_task = NewTask {
            title,
            description: match optional_string(args_obj, "description") {
                Ok(value) => value,
                Err(resp) => return resp,
            },
            column: match optional_string(args_obj, "column") {
                Ok(value) => value,
                Err(resp) => return resp,
            },
            labels: match optional_string_array(args_obj, "labels") {
                Ok(value) => value.unwrap_or_default(),
                Err(resp) => return resp,
            },
            priority: match optional_i64(args_obj, "priority") {
                Ok(value) => value,
                Err(resp) => return resp,
            },
            story_points: match optional_f64(args_obj, "storyPoints") {
                Ok(value) => value,
                Err(resp) => return resp,
            },
            sprint: match optional_string(args_obj, "sprint") {
                Ok(value) => value,
                Err(resp) => return resp,
            },
        };
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match create_task(&path, new_task) {
            Ok(task) => ai_ok("create_task", json!({ "task": to_json(&task) })),
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_get_task(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let id = match require_u64(args_obj, "id") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match get_task(&path, id) {
            Ok(task) => ai_ok("get_task", json!({ "task": to_json(&task) })),
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_list_tasks(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let column = match optional_string(args_obj, "column") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let sprint = match optional_string(args_obj, "sprint") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match list_tasks(&path, column.as_deref(), sprint.as_deref()) {
            Ok(tasks) => ai_ok(
                "list_tasks",
                json!({ "count": tasks.len(), "tasks": to_json(&tasks) }),
            ),
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_update_task(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let id = match require_u64(args_obj, "id") {
            Ok(value) => value,
            Err(resp) => return resp,
        };
        let patch = match parse_task_patch(args_obj) {
            Ok(patch) => patch,
            Err(resp) => return resp,
        };
        if patch.is_empty() {
            return ai_error("INVALID_INPUT", "no task fields to update");
        }
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match update_task(&path, id, &patch) {
            Ok(task) => ai_ok("update_task", json!({ "task": to_json(&task) })),
            Err(err) => store_error(&err),
        }
    }

    pub(crate) fn tool_update_tasks_batch(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let Some(updates_obj) = args_obj.get("updates").and_then(Value::as_object) else {
            return ai_error("INVALID_INPUT", "updates must be an object");
        };

        let mut patches = BTreeMap::new();
        for (key, value) in updates_obj {
            let Ok(id) = key.parse::<u64>() else {
                return ai_error(
                    "INVALID_INPUT",
                    &format!("updates keys must be task ids, got: {key}"),
                );
            };
            let Some(update_obj) = value.as_object() else {
                return ai_error(
                    "INVALID_INPUT",
                    &format!("update for task {id} must be an object"),
                );
            };
            let patch = match parse_task_patch(update_obj) {
                Ok(patch) => patch,
                Err(resp) => return resp,
            };
            patches.insert(id, patch);
        }
        let filename = match optional_string(args_obj, "filename") {
            Ok(value) => value,
            Err(resp) => return resp,
        };

        let path = self.board_path(filename.as_deref());
        match update_tasks_batch(&path, &patches) {
            Ok(updated) => {
                let tasks = updated
                    .values()
                    .map(to_json)
                    .collect::<Vec<_>>();
                ai_ok(
                    "update_tasks_batch",
                    json!({ "count": tasks.len(), "tasks": tasks }),
                )
            }
            Err(err) => store_error(&err),
        }
    }
}

fn parse_task_patch(args_obj: &Map<String, Value>) -> Result<TaskPatch, Value> {
    Ok(TaskPatch {
        title: optional_string(args_obj, "title")?,
        description: optional_string(args_obj, "description")?,
        column: optional_string(args_obj, "column")?,
        labels: optional_string_array(args_obj, "labels")?,
        priority: optional_i64(args_obj, "priority")?,
        story_points: optional_f64(args_obj, "storyPoints")?,
        sprint: optional_string(args_obj, "sprint")?,
    })
}
