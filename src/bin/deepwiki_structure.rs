//! List documentation topics for a GitHub repository via DeepWiki.

use std::process::ExitCode;

use clap::Parser;

use mcp_bridge::{PayloadKey, ToolCommand, runner};

const COMMAND: ToolCommand = ToolCommand {
    server: "deepwiki",
    tool: "read_wiki_structure",
    payload: PayloadKey::Data,
};

/// Get the documentation structure for a GitHub repository using DeepWiki.
#[derive(Parser)]
#[command(name = "deepwiki-structure", version)]
struct Args {
    /// GitHub repository (owner/repo, e.g. "facebook/react").
    #[arg(short, long)]
    repo: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    mcp_bridge::init_logging();
    let args = Args::parse();

    let arguments = serde_json::json!({
        "repoName": args.repo,
    });

    runner::run(&COMMAND, arguments).await
}
