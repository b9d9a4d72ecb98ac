//! Web search via the Exa MCP server configured in Claude Code.

use std::process::ExitCode;

use clap::Parser;

use mcp_bridge::{PayloadKey, ToolCommand, runner};

const COMMAND: ToolCommand = ToolCommand {
    server: "exa",
    tool: "web_search_exa",
    payload: PayloadKey::Results,
};

/// Web search using the Exa MCP server (auto-discovered from Claude Code config).
#[derive(Parser)]
#[command(name = "exa-search", version)]
struct Args {
    /// Search query.
    #[arg(short, long)]
    query: String,

    /// Search type.
    #[arg(short = 't', long = "type", value_parser = ["auto", "fast", "deep"], default_value = "auto")]
    search_type: String,

    /// Number of results.
    #[arg(short, long, default_value_t = 8)]
    results: u32,

    /// Max characters of context per result.
    #[arg(short = 'c', long, default_value_t = 10_000)]
    context_chars: u32,
}

#[tokio::main]
async fn main() -> ExitCode {
    mcp_bridge::init_logging();
    let args = Args::parse();

    let arguments = serde_json::json!({
        "query": args.query,
        "type": args.search_type,
        "numResults": args.results,
        "contextMaxCharacters": args.context_chars,
    });

    runner::run(&COMMAND, arguments).await
}
