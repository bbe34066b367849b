#![forbid(unsafe_code)]

use crate::McpServer;
use serde_json::{Value, json};
use std::path::PathBuf;

impl McpServer {
    pub(crate) fn new(working_dir: PathBuf) -> Self {
        Self {
            initialized: false,
            working_dir,
        }
    }

    pub(crate) fn handle(&mut self, request: crate::JsonRpcRequest) -> Option<Value> {
        let method = request.method.as_str();

        if method == "initialize" {
            return Some(crate::json_rpc_response(
                request.id,
                json!( {
                    "protocolVersion": crate::MCP_VERSION,
                    "serverInfo": { "name": crate::SERVER_NAME, "version": crate::SERVER_VERSION },
                    "capabilities": { "tools": {} }
                }),
            ));
        }

        if !self.initialized
            && method != "notifications/initialized"
            && method != "initialized"
        {
            if request.id.is_none() {
                return None;
            }
            return Some(crate::json_rpc_error(
                request.id,
                -32002,
                "Server not initialized",
            ));
        }

        if method == "notifications/initialized" || method == "initialized" {
            self.initialized = true;
            return None;
        }

        if method == "ping" {
            return Some(crate::json_rpc_response(request.id, json!({})));
        }

        // Some clients probe optional resources methods by default; advertise
        // an empty resource set rather than erroring.
        if method == "resources/list" {
            return Some(crate::json_rpc_response(
                request.id,
                json!({ "resources": [] }),
            ));
        }
        if method == "resources/read" {
            return Some(crate::json_rpc_response(
                request.id,
                json!({ "contents": [] }),
            ));
        }

        if method == "tools/list" {
            return Some(crate::json_rpc_response(
                request.id,
                json!({ "tools": crate::tools::tool_definitions() }),
            ));
        }

        if method == "tools/call" {
            let Some(params_obj) = request.params.as_ref().and_then(Value::as_object) else {
                return Some(crate::json_rpc_error(
                    request.id,
                    -32602,
                    "params must be an object",
                ));
            };

            let tool_name = params_obj
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            let args = params_obj
                .get("arguments")
                .cloned()
                .unwrap_or_else(|| json!({}));
            let response_body = self.call_tool(tool_name, args);

            return Some(crate::json_rpc_response(
                request.id,
                json!( {
                    "content": [crate::tool_text_content(&response_body)],
                    "isError": !response_body.get("success").and_then(|v| v.as_bool()).unwrap_or(false)
                }),
            ));
        }

        // Notifications never get a response, not even for unknown methods.
        if request.id.is_none() {
            return None;
        }

        Some(crate::json_rpc_error(
            request.id,
            -32601,
            &format!("Method not found: {method}"),
        ))
    }

    pub(crate) fn call_tool(&mut self, name: &str, args: Value) -> Value {
        match crate::tools::dispatch_tool(self, name, args) {
            Some(resp) => resp,
            None => crate::ai_error("UNKNOWN_TOOL", &format!("Unknown tool: {name}")),
        }
    }

    /// Resolve a tool-supplied board file name against the working directory.
    /// Missing names fall back to the default `.knbn` file.
    pub(crate) fn board_path(&self, filename: Option<&str>) -> PathBuf {
        self.working_dir
            .join(filename.unwrap_or(kn_core::DEFAULT_BOARD_FILE))
    }
}
