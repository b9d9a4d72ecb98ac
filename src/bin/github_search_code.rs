//! Search code across GitHub repositories via the GitHub MCP server.

use std::process::ExitCode;

use clap::Parser;

use mcp_bridge::{PayloadKey, ToolCommand, runner};

const COMMAND: ToolCommand = ToolCommand {
    server: "github",
    tool: "search_code",
    payload: PayloadKey::Data,
};

/// Search code across GitHub repositories.
///
/// Query uses GitHub code search syntax, e.g. "HttpConnector language:rust"
/// or "repo:org/repo function".
#[derive(Parser)]
#[command(name = "github-search-code", version)]
struct Args {
    /// Search query using GitHub code search syntax.
    #[arg(short, long)]
    query: String,

    /// Sort field (only "indexed" is supported).
    #[arg(short, long, value_parser = ["indexed"])]
    sort: Option<String>,

    /// Sort order.
    #[arg(short, long, value_parser = ["asc", "desc"])]
    order: Option<String>,

    /// Page number for pagination (min 1).
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Results per page (1-100).
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=100))]
    per_page: u32,
}

#[tokio::main]
async fn main() -> ExitCode {
    mcp_bridge::init_logging();
    let args = Args::parse();

    let mut arguments = serde_json::json!({
        "query": args.query,
        "page": args.page,
        "perPage": args.per_page,
    });

    if let Some(sort) = args.sort {
        arguments["sort"] = serde_json::json!(sort);
    }
    if let Some(order) = args.order {
        arguments["order"] = serde_json::json!(order);
    }

    runner::run(&COMMAND, arguments).await
}
