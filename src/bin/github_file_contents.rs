//! Fetch file or directory contents from a GitHub repository via the
//! GitHub MCP server.

use std::process::ExitCode;

use clap::Parser;

use mcp_bridge::{PayloadKey, ToolCommand, runner};

const COMMAND: ToolCommand = ToolCommand {
    server: "github",
    tool: "get_file_contents",
    payload: PayloadKey::Data,
};

/// Get file or directory contents from a GitHub repository.
///
/// Directory paths must end with a slash '/'.
#[derive(Parser)]
#[command(name = "github-file-contents", version)]
struct Args {
    /// Repository owner (username or organization).
    #[arg(short, long)]
    owner: String,

    /// Repository name.
    #[arg(short, long)]
    repo: String,

    /// Path to file or directory (directories must end with '/').
    #[arg(short, long, default_value = "/")]
    path: String,

    /// Git ref such as "refs/tags/v1.0.0", "refs/heads/main", or
    /// "refs/pull/123/head".
    #[arg(long = "ref")]
    git_ref: Option<String>,

    /// Commit SHA (used instead of ref when given).
    #[arg(long)]
    sha: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    mcp_bridge::init_logging();
    let args = Args::parse();

    let mut arguments = serde_json::json!({
        "owner": args.owner,
        "repo": args.repo,
        "path": args.path,
    });

    if let Some(git_ref) = args.git_ref {
        arguments["ref"] = serde_json::json!(git_ref);
    }
    if let Some(sha) = args.sha {
        arguments["sha"] = serde_json::json!(sha);
    }

    runner::run(&COMMAND, arguments).await
}
