//! MCP Bridge - thin CLI bridges to HTTP MCP servers.
//!
//! Each binary proxies exactly one tool call to a remote MCP server
//! discovered from Claude Code settings files:
//!
//! ```text
//! ┌─────────────┐
//! │ CLI adapter │  one binary per (server, tool) pair
//! └──────┬──────┘
//!        │
//! resolve config → verify client → connect → call → disconnect → format
//!        │
//! ┌──────┴──────┐
//! │  envelope   │  one JSON object on stdout, exit code mirrors success
//! └─────────────┘
//! ```
//!
//! Every invocation is a clean process: config is read fresh, a single
//! connection is made and unconditionally released, and no state survives
//! the run.

pub mod bootstrap;
pub mod config;
pub mod connector;
pub mod envelope;
pub mod error;
pub mod protocol;
pub mod runner;
pub mod transport;

pub use envelope::{PayloadKey, ResultEnvelope};
pub use error::{BridgeError, Result};
pub use runner::ToolCommand;

/// Initialize stderr logging for a bridge binary.
///
/// Stdout is reserved for the result envelope; diagnostics go to stderr,
/// filtered by `RUST_LOG` with a `warn` default.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
