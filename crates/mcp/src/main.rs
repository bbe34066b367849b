#![forbid(unsafe_code)]

mod entry;
mod server;
mod support;
mod tools;

pub(crate) use support::*;

use std::path::PathBuf;

// Protocol negotiation: some MCP clients are strict about the server echoing
// a compatible protocol version. Stay at the widely deployed baseline.
const MCP_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "knbn-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) struct McpServer {
    initialized: bool,
    working_dir: PathBuf,
}

fn usage() -> &'static str {
    "kn_mcp — KnBn board MCP server (Rust, stdio-first)\n\n\
USAGE:\n\
  kn_mcp [--working-dir DIR]\n\
\n\
FLAGS:\n\
  -h, --help       Print this help and exit\n\
  -V, --version    Print version and exit\n\
\n\
NOTES:\n\
  - Board files (*.knbn) are resolved against the working directory.\n\
  - The working directory defaults to the process cwd, resolved once at startup.\n"
}

fn parse_working_dir(args: &[String]) -> Result<PathBuf, String> {
    let mut working_dir = None;
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--working-dir" {
            let Some(dir) = iter.next() else {
                return Err("--working-dir requires a value".to_string());
            };
            working_dir = Some(PathBuf::from(dir));
        }
    }
    match working_dir {
        Some(dir) => {
            if !dir.is_dir() {
                return Err(format!("working directory does not exist: {}", dir.display()));
            }
            Ok(dir)
        }
        None => std::env::current_dir().map_err(|err| format!("cannot resolve cwd: {err}")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().collect::<Vec<_>>();
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        print!("{}", usage());
        return Ok(());
    }
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-V" | "--version"))
    {
        println!("kn_mcp {SERVER_VERSION}");
        return Ok(());
    }

    let working_dir = parse_working_dir(&args).map_err(std::io::Error::other)?;
    let mut server = McpServer::new(working_dir);
    entry::run_stdio(&mut server)
}
