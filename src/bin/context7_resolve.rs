//! Resolve a library name to a Context7-compatible library ID.

use std::process::ExitCode;

use clap::Parser;

use mcp_bridge::{PayloadKey, ToolCommand, runner};

const COMMAND: ToolCommand = ToolCommand {
    server: "context7",
    tool: "resolve-library-id",
    payload: PayloadKey::Data,
};

/// Resolve a library name to a Context7-compatible library ID.
#[derive(Parser)]
#[command(name = "context7-resolve", version)]
struct Args {
    /// Library name to search for (e.g. "react", "next.js", "mongodb").
    #[arg(short, long)]
    library: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    mcp_bridge::init_logging();
    let args = Args::parse();

    let arguments = serde_json::json!({
        "libraryName": args.library,
    });

    runner::run(&COMMAND, arguments).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_library_flag() {
        let args = Args::parse_from(["context7-resolve", "-l", "react"]);
        assert_eq!(args.library, "react");
    }

    #[test]
    fn library_is_required() {
        assert!(Args::try_parse_from(["context7-resolve"]).is_err());
    }
}
