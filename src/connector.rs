//! Connect → call → disconnect discipline for one tool invocation.

use serde_json::Value;

use crate::error::Result;
use crate::transport::ToolTransport;

/// A single named remote operation with keyword arguments.
///
/// Constructed once per run from CLI input and never reused.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    /// Name of the tool as the remote server advertises it.
    pub tool: String,
    /// Tool arguments as a JSON object.
    pub arguments: Value,
}

/// Perform exactly one tool invocation over `transport`.
///
/// The connection is released on every exit path after a successful
/// connect, including when the call itself fails mid-flight. No retries:
/// one invocation maps to one connection attempt.
///
/// # Errors
///
/// Returns `ConnectionError` if the handshake fails (no disconnect is
/// issued in that case) and `ToolError` if the remote server rejects the
/// call after a successful connect.
pub async fn invoke<T: ToolTransport>(transport: &mut T, invocation: &ToolInvocation) -> Result<Value> {
    transport.connect().await?;

    let outcome = transport
        .call_tool(&invocation.tool, &invocation.arguments)
        .await;

    transport.disconnect().await;

    if let Err(e) = &outcome {
        tracing::debug!(tool = %invocation.tool, error = %e, "tool call failed");
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::BridgeError;

    /// Fault-injected transport double recording call counts.
    struct RecordingTransport {
        fail_connect: bool,
        fail_call: bool,
        connects: u32,
        calls: u32,
        disconnects: u32,
    }

    impl RecordingTransport {
        fn new() -> Self {
            Self {
                fail_connect: false,
                fail_call: false,
                connects: 0,
                calls: 0,
                disconnects: 0,
            }
        }
    }

    #[async_trait]
    impl ToolTransport for RecordingTransport {
        async fn connect(&mut self) -> Result<()> {
            self.connects += 1;
            if self.fail_connect {
                return Err(BridgeError::Connection("refused".to_string()));
            }
            Ok(())
        }

        async fn call_tool(&mut self, name: &str, _arguments: &Value) -> Result<Value> {
            self.calls += 1;
            if self.fail_call {
                return Err(BridgeError::Tool(format!("server rejected '{name}'")));
            }
            Ok(serde_json::json!({"echo": name}))
        }

        async fn disconnect(&mut self) {
            self.disconnects += 1;
        }
    }

    fn invocation() -> ToolInvocation {
        ToolInvocation {
            tool: "web_search_exa".to_string(),
            arguments: serde_json::json!({"query": "test"}),
        }
    }

    #[tokio::test]
    async fn success_path_closes_exactly_once() {
        let mut transport = RecordingTransport::new();

        let payload = invoke(&mut transport, &invocation()).await.unwrap();
        assert_eq!(payload["echo"], "web_search_exa");
        assert_eq!(transport.connects, 1);
        assert_eq!(transport.calls, 1);
        assert_eq!(transport.disconnects, 1);
    }

    #[tokio::test]
    async fn mid_call_fault_still_closes_exactly_once() {
        let mut transport = RecordingTransport::new();
        transport.fail_call = true;

        let err = invoke(&mut transport, &invocation()).await.unwrap_err();
        assert_eq!(err.error_type(), "ToolError");
        assert_eq!(transport.disconnects, 1);
    }

    #[tokio::test]
    async fn connect_failure_makes_no_call_and_no_disconnect() {
        let mut transport = RecordingTransport::new();
        transport.fail_connect = true;

        let err = invoke(&mut transport, &invocation()).await.unwrap_err();
        assert_eq!(err.error_type(), "ConnectionError");
        assert_eq!(transport.calls, 0);
        assert_eq!(transport.disconnects, 0);
    }
}
