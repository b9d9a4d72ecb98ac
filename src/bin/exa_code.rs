//! Code context lookup via the Exa MCP server configured in Claude Code.

use std::process::ExitCode;

use clap::Parser;

use mcp_bridge::{PayloadKey, ToolCommand, runner};

const COMMAND: ToolCommand = ToolCommand {
    server: "exa",
    tool: "get_code_context_exa",
    payload: PayloadKey::Data,
};

/// Get code context for APIs, libraries, and SDKs using the Exa MCP server.
#[derive(Parser)]
#[command(name = "exa-code", version)]
struct Args {
    /// Search query (e.g. "tokio channel backpressure").
    #[arg(short, long)]
    query: String,

    /// Number of tokens to return (1000-50000).
    #[arg(short, long, default_value_t = 5000, value_parser = clap::value_parser!(u32).range(1000..=50000))]
    tokens: u32,
}

#[tokio::main]
async fn main() -> ExitCode {
    mcp_bridge::init_logging();
    let args = Args::parse();

    let arguments = serde_json::json!({
        "query": args.query,
        "tokensNum": args.tokens,
    });

    runner::run(&COMMAND, arguments).await
}
