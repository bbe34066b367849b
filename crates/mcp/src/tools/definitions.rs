#![forbid(unsafe_code)]

use serde_json::{Value, json};

fn filename_property() -> Value {
    json!({ "type": "string", "description": "Board filename (defaults to .knbn)" })
}

pub(crate) fn tool_definitions() -> Vec<Value> {
    vec![
        json!({
            "name": "create_board",
            "description": "Create a new .knbn board file.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Board name" },
                    "description": { "type": "string", "description": "Board description" },
                    "filename": { "type": "string", "description": "Custom filename (defaults to one derived from the board name)" }
                },
                "required": ["name"]
            },
        }),
        json!({
            "name": "get_board",
            "description": "Get the full contents of a board file.",
            "inputSchema": {
                "type": "object",
                "properties": { "filename": filename_property() }
            },
        }),
        json!({
            "name": "list_boards",
            "description": "List all .knbn board files in the working directory.",
            "inputSchema": { "type": "object", "properties": {} },
        }),
        json!({
            "name": "migrate",
            "description": "Migrate board files to the latest schema version, with dry-run, backup, and batch processing.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "files": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Board files to migrate (e.g. [\"board1.knbn\", \"board2.knbn\"])"
                    },
                    "all": { "type": "boolean", "description": "Migrate all .knbn files in the working directory" },
                    "dryRun": { "type": "boolean", "description": "Show what would be migrated without making changes" },
                    "backup": { "type": "boolean", "description": "Create backup files before migration (adds .bak extension)" }
                }
            },
        }),
        json!({
            "name": "create_task",
            "description": "Create a new task in a board.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "title": { "type": "string", "description": "Task title" },
                    "description": { "type": "string", "description": "Task description" },
                    "column": { "type": "string", "description": "Column to place the task in (defaults to none, aka backlog)" },
                    "labels": { "type": "array", "items": { "type": "string" }, "description": "Task labels" },
                    "priority": { "type": "integer", "description": "Task priority" },
                    "storyPoints": { "type": "number", "description": "Story points for the task" },
                    "sprint": { "type": "string", "description": "Sprint assignment" },
                    "filename": filename_property()
                },
                "required": ["title"]
            },
        }),
        json!({
            "name": "get_task",
            "description": "Get one task by id.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer", "description": "Task ID" },
                    "filename": filename_property()
                },
                "required": ["id"]
            },
        }),
        json!({
            "name": "list_tasks",
            "description": "List tasks, optionally filtered by column and/or sprint.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "column": { "type": "string", "description": "Only tasks in this column" },
                    "sprint": { "type": "string", "description": "Only tasks in this sprint" },
                    "filename": filename_property()
                }
            },
        }),
        json!({
            "name": "update_task",
            "description": "Update an existing task.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer", "description": "Task ID to update" },
                    "title": { "type": "string", "description": "New task title" },
                    "description": { "type": "string", "description": "New task description" },
                    "column": { "type": "string", "description": "New column for the task" },
                    "labels": { "type": "array", "items": { "type": "string" }, "description": "New task labels" },
                    "priority": { "type": "integer", "description": "New task priority" },
                    "storyPoints": { "type": "number", "description": "New story points for the task" },
                    "sprint": { "type": "string", "description": "New sprint assignment" },
                    "filename": filename_property()
                },
                "required": ["id"]
            },
        }),
        json!({
            "name": "update_tasks_batch",
            "description": "Update multiple tasks in one load/save cycle.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "updates": {
                        "type": "object",
                        "description": "Record of task ID to task update mapping"
                    },
                    "filename": filename_property()
                },
                "required": ["updates"]
            },
        }),
        json!({
            "name": "create_column",
            "description": "Add a new column to a board.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Column name" },
                    "filename": filename_property()
                },
                "required": ["name"]
            },
        }),
        json!({
            "name": "list_columns",
            "description": "List board columns with task counts.",
            "inputSchema": {
                "type": "object",
                "properties": { "filename": filename_property() }
            },
        }),
        json!({
            "name": "update_column",
            "description": "Rename an existing column.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "currentName": { "type": "string", "description": "Current column name" },
                    "newName": { "type": "string", "description": "New column name" },
                    "filename": filename_property()
                },
                "required": ["currentName", "newName"]
            },
        }),
        json!({
            "name": "remove_column",
            "description": "Remove a column; its tasks fall back to the backlog.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Column name" },
                    "filename": filename_property()
                },
                "required": ["name"]
            },
        }),
        json!({
            "name": "add_label",
            "description": "Add a new label to a board.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Label name" },
                    "color": { "type": "string", "description": "Label color" },
                    "filename": filename_property()
                },
                "required": ["name"]
            },
        }),
        json!({
            "name": "list_labels",
            "description": "List board labels.",
            "inputSchema": {
                "type": "object",
                "properties": { "filename": filename_property() }
            },
        }),
        json!({
            "name": "update_label",
            "description": "Rename or recolor an existing label.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "currentName": { "type": "string", "description": "Current label name" },
                    "newName": { "type": "string", "description": "New label name" },
                    "color": { "type": "string", "description": "New label color" },
                    "filename": filename_property()
                },
                "required": ["currentName"]
            },
        }),
        json!({
            "name": "remove_label",
            "description": "Remove a label from a board.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Label name" },
                    "filename": filename_property()
                },
                "required": ["name"]
            },
        }),
        json!({
            "name": "add_sprint",
            "description": "Add a new sprint to a board.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Sprint name" },
                    "description": { "type": "string", "description": "Sprint description" },
                    "capacity": { "type": "number", "description": "Sprint capacity" },
                    "starts": { "type": "string", "description": "Sprint start date (ISO string)" },
                    "ends": { "type": "string", "description": "Sprint end date (ISO string)" },
                    "filename": filename_property()
                },
                "required": ["name"]
            },
        }),
        json!({
            "name": "list_sprints",
            "description": "List board sprints.",
            "inputSchema": {
                "type": "object",
                "properties": { "filename": filename_property() }
            },
        }),
        json!({
            "name": "update_sprint",
            "description": "Update an existing sprint.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "currentName": { "type": "string", "description": "Current sprint name" },
                    "newName": { "type": "string", "description": "New sprint name" },
                    "description": { "type": "string", "description": "New sprint description" },
                    "capacity": { "type": "number", "description": "New sprint capacity" },
                    "starts": { "type": "string", "description": "New sprint start date" },
                    "ends": { "type": "string", "description": "New sprint end date" },
                    "filename": filename_property()
                },
                "required": ["currentName"]
            },
        }),
        json!({
            "name": "remove_sprint",
            "description": "Remove a sprint from a board.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Sprint name" },
                    "filename": filename_property()
                },
                "required": ["name"]
            },
        }),
    ]
}
