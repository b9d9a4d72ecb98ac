//! Top-level invocation pipeline.
//!
//! Strictly sequential: verify client → resolve config → connect → call →
//! disconnect → format. Every error is caught here and translated to a
//! failure envelope; the process never dies on an unhandled fault, and the
//! exit code always agrees with the envelope's `success` boolean.

use std::path::PathBuf;
use std::process::ExitCode;

use serde_json::Value;

use crate::bootstrap::{Bootstrap, ClientBootstrap};
use crate::config::{self, ServerConfig};
use crate::connector::{self, ToolInvocation};
use crate::envelope::{PayloadKey, ResultEnvelope};
use crate::error::Result;
use crate::transport::{HttpTransport, ToolTransport};

/// Capability record binding one binary to one (server, tool) pair.
#[derive(Debug, Clone, Copy)]
pub struct ToolCommand {
    /// Server name pattern to resolve against the settings files.
    pub server: &'static str,
    /// Tool name as the remote server advertises it.
    pub tool: &'static str,
    /// Envelope key for the success payload.
    pub payload: PayloadKey,
}

/// Run one invocation end to end and print the envelope to stdout.
pub async fn run(command: &ToolCommand, arguments: Value) -> ExitCode {
    let envelope = execute(command, arguments).await;
    print_envelope(&envelope)
}

/// Run the pipeline with production wiring, translating every failure
/// into an envelope.
pub async fn execute(command: &ToolCommand, arguments: Value) -> ResultEnvelope {
    let bootstrap = ClientBootstrap;

    let paths = match config::default_candidate_paths() {
        Ok(paths) => paths,
        Err(e) => return ResultEnvelope::failure(&e),
    };

    execute_with(command, arguments, &bootstrap, &paths, |server| {
        let client = bootstrap.client()?;
        HttpTransport::new(client, server)
    })
    .await
}

/// Pipeline with injectable bootstrap, candidate paths, and transport
/// factory. The production path and the tests share this seam.
pub async fn execute_with<B, T, F>(
    command: &ToolCommand,
    arguments: Value,
    bootstrap: &B,
    paths: &[PathBuf],
    make_transport: F,
) -> ResultEnvelope
where
    B: Bootstrap,
    T: ToolTransport,
    F: FnOnce(&ServerConfig) -> Result<T>,
{
    let outcome = async {
        bootstrap.ensure_available()?;

        let server = config::resolve(command.server, paths)?;
        let mut transport = make_transport(&server)?;

        let invocation = ToolInvocation {
            tool: command.tool.to_string(),
            arguments,
        };

        let payload = connector::invoke(&mut transport, &invocation).await?;
        Ok((payload, server))
    }
    .await;

    match outcome {
        Ok((payload, server)) => {
            ResultEnvelope::success(payload, command.payload, command.tool, &server)
        }
        Err(e) => {
            tracing::warn!(server = command.server, tool = command.tool, error = %e, "invocation failed");
            ResultEnvelope::failure(&e)
        }
    }
}

/// Print exactly one newline-terminated JSON object on stdout and return
/// the matching exit code.
fn print_envelope(envelope: &ResultEnvelope) -> ExitCode {
    match serde_json::to_string_pretty(envelope) {
        Ok(body) => {
            println!("{body}");
            envelope.exit_code()
        }
        Err(e) => {
            // Unreachable for our own types, but the output contract holds
            // even here: a well-formed failure envelope plus exit 1.
            let fallback = serde_json::json!({
                "success": false,
                "error": format!("failed to encode result envelope: {e}"),
                "error_type": "ToolError",
            });
            println!("{fallback}");
            ExitCode::FAILURE
        }
    }
}
