#![forbid(unsafe_code)]

use crate::McpServer;
use serde_json::Value;

pub(crate) fn dispatch_tool(server: &mut McpServer, name: &str, args: Value) -> Option<Value> {
    let resp = match name {
        "create_board" => server.tool_create_board(args),
        "get_board" => server.tool_get_board(args),
        "list_boards" => server.tool_list_boards(args),
        "migrate" => server.tool_migrate(args),
        "create_task" => server.tool_create_task(args),
        "get_task" => server.tool_get_task(args),
        "list_tasks" => server.tool_list_tasks(args),
        "update_task" => server.tool_update_task(args),
        "update_tasks_batch" => server.tool_update_tasks_batch(args),
        "create_column" => server.tool_create_column(args),
        "list_columns" => server.tool_list_columns(args),
        "update_column" => server.tool_update_column(args),
        "remove_column" => server.tool_remove_column(args),
        "add_label" => server.tool_add_label(args),
        "list_labels" => server.tool_list_labels(args),
        "update_label" => server.tool_update_label(args),
        "remove_label" => server.tool_remove_label(args),
        "add_sprint" => server.tool_add_sprint(args),
        "list_sprints" => server.tool_list_sprints(args),
        "update_sprint" => server.tool_update_sprint(args),
        "remove_sprint" => server.tool_remove_sprint(args),
        _ => return None,
    };
    Some(resp)
}
