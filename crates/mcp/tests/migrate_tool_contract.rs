#![forbid(unsafe_code)]

use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

struct McpClient {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    working_dir: PathBuf,
}

impl McpClient {
    fn start(test_name: &str) -> Self {
        let working_dir = temp_dir(test_name);
        std::fs::create_dir_all(&working_dir).expect("create working dir");

        let mut child = Command::new(env!("CARGO_BIN_EXE_kn_mcp"))
            .arg("--working-dir")
            .arg(&working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .expect("spawn kn_mcp");

        let stdin = child.stdin.take().expect("stdin");
        let stdout = BufReader::new(child.stdout.take().expect("stdout"));

        let mut client = Self {
            child,
            stdin,
            stdout,
            working_dir,
        };
        let init = client.request(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {}
        }));
        assert!(init.get("result").is_some(), "initialize must return result");
        client.send(json!({ "jsonrpc": "2.0", "method": "initialized", "params": {} }));
        client
    }

    fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn send(&mut self, req: Value) {
        let body = serde_json::to_vec(&req).expect("serialize request");
        write!(self.stdin, "Content-Length: {}\r\n\r\n", body.len()).expect("write header");
        self.stdin.write_all(&body).expect("write body");
        self.stdin.flush().expect("flush request");
    }

    fn recv(&mut self) -> Value {
        let mut content_length: Option<usize> = None;
        loop {
            let mut line = String::new();
            let read = self.stdout.read_line(&mut line).expect("read header line");
            assert!(read > 0, "unexpected EOF reading response headers");
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                break;
            }
            if let Some((key, value)) = trimmed.split_once(':')
                && key.trim().eq_ignore_ascii_case("content-length")
            {
                content_length = Some(value.trim().parse::<usize>().expect("content-length"));
            }
        }

        let len = content_length.expect("missing Content-Length in response");
        let mut buf = vec![0u8; len];
        self.stdout
            .read_exact(&mut buf)
            .expect("read response body");
        serde_json::from_slice(&buf).expect("parse response json")
    }

    fn request(&mut self, req: Value) -> Value {
        self.send(req);
        self.recv()
    }

    fn migrate(&mut self, id: u64, arguments: Value) -> Value {
        let resp = self.request(json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": "migrate", "arguments": arguments }
        }));
        let text = resp
            .get("result")
            .and_then(|v| v.get("content"))
            .and_then(|v| v.as_array())
            .and_then(|items| items.first())
            .and_then(|item| item.get("text"))
            .and_then(|v| v.as_str())
            .expect("result.content[0].text");
        serde_json::from_str(text).expect("parse tool payload")
    }
}

impl Drop for McpClient {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = std::fs::remove_dir_all(&self.working_dir);
    }
}

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    base.join(format!("kn_mcp_migrate_{test_name}_{pid}_{nonce}"))
}

fn write_legacy_board(dir: &Path, filename: &str) {
    let body = r#"configuration:
  name: Legacy Board
  description: Needs migrating
  columns:
    - To Do
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
columns:
  - name: To Do
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

#[test]
fn migrates_listed_files_with_backup() {
    let mut client = McpClient::start("listed_files_backup");
    write_legacy_board(client.working_dir(), "legacy.knbn");
    write_current_board(client.working_dir(), "current.knbn");

    let payload = client.migrate(
        2,
        json!({ "files": ["legacy.knbn", "current.knbn"], "backup": true }),
    );
    assert_eq!(payload.get("success"), Some(&json!(true)));

    let result = payload.get("result").expect("result");
    assert_eq!(result.get("migratedCount"), Some(&json!(1)));
    assert_eq!(result.get("skippedCount"), Some(&json!(1)));
    assert_eq!(result.get("errorCount"), Some(&json!(0)));

    let results = result
        .get("results")
        .and_then(|v| v.as_array())
        .expect("results array");
    assert_eq!(results.len(), 2);
    let legacy = &results[0];
    assert_eq!(
        legacy.get("status").and_then(|v| v.as_str()),
        Some("migrated")
    );
    assert_eq!(
        legacy.get("fromVersion").and_then(|v| v.as_str()),
        Some("0.1")
    );
    assert_eq!(
        legacy.get("toVersion").and_then(|v| v.as_str()),
        Some("0.2")
    );
    assert_eq!(
        legacy.get("message").and_then(|v| v.as_str()),
        Some("Migrated from 0.1 to 0.2")
    );
    assert_eq!(legacy.get("backupCreated"), Some(&json!(true)));
    let current = &results[1];
    assert_eq!(
        current.get("status").and_then(|v| v.as_str()),
        Some("skipped")
    );
    assert_eq!(current.get("backupCreated"), Some(&json!(false)));

    // Only the rewritten file gets a backup copy.
    assert!(client.working_dir().join("legacy.knbn.bak").is_file());
    assert!(!client.working_dir().join("current.knbn.bak").exists());

    let migrated =
        std::fs::read_to_string(client.working_dir().join("legacy.knbn")).expect("read migrated");
    assert!(migrated.contains("version: '0.2'") || migrated.contains("version: \"0.2\""));
}

#[test]
fn dry_run_reports_without_writing() {
    let mut client = McpClient::start("dry_run");
    write_legacy_board(client.working_dir(), "legacy.knbn");
    let before =
        std::fs::read_to_string(client.working_dir().join("legacy.knbn")).expect("read before");

    let payload = client.migrate(2, json!({ "all": true, "dryRun": true }));
    assert_eq!(payload.get("success"), Some(&json!(true)));

    let result = payload.get("result").expect("result");
    assert_eq!(result.get("migratedCount"), Some(&json!(1)));
    let summary = result
        .get("summary")
        .and_then(|v| v.as_str())
        .expect("summary");
    assert!(summary.contains("Would migrate: 1 files"), "got: {summary}");
    assert!(
        summary.contains("Run without dryRun to perform the migration."),
        "got: {summary}"
    );

    let after =
        std::fs::read_to_string(client.working_dir().join("legacy.knbn")).expect("read after");
    assert_eq!(before, after, "dry run must not rewrite the file");
}

#[test]
fn rejects_call_without_files_or_all() {
    let mut client = McpClient::start("config_error");

    let payload = client.migrate(2, json!({}));
    assert_eq!(payload.get("success"), Some(&json!(false)));
    let message = payload
        .get("error")
        .and_then(|v| v.get("message"))
        .and_then(|v| v.as_str())
        .expect("error message");
    assert!(
        message.contains("either files array or all flag must be specified"),
        "got: {message}"
    );
}

#[test]
fn reports_empty_directory_in_all_mode() {
    let mut client = McpClient::start("empty_dir");

    let payload = client.migrate(2, json!({ "all": true }));
    assert_eq!(payload.get("success"), Some(&json!(true)));
    let summary = payload
        .get("result")
        .and_then(|v| v.get("summary"))
        .and_then(|v| v.as_str())
        .expect("summary");
    assert_eq!(summary, "No .knbn files found in current directory");
}
