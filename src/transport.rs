//! HTTP transport for single-shot MCP tool calls.
//!
//! The remote boundary is the [`ToolTransport`] capability: connect, call
//! one tool, disconnect. Any implementation satisfying it is substitutable;
//! tests use recording fakes, production uses [`HttpTransport`] speaking
//! MCP streamable HTTP over `reqwest`.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ServerConfig;
use crate::error::{BridgeError, Result};
use crate::protocol::{Request, Response, ToolCallResult};

/// Capability interface to a remote tool server.
#[async_trait]
pub trait ToolTransport {
    /// Open the connection (network handshake and session setup).
    async fn connect(&mut self) -> Result<()>;

    /// Call one named tool and return its payload.
    async fn call_tool(&mut self, name: &str, arguments: &Value) -> Result<Value>;

    /// Release the connection. Must be safe to call on every exit path.
    async fn disconnect(&mut self);
}

/// Streamable-HTTP MCP transport.
///
/// One instance serves exactly one invocation: a fresh session is
/// established on `connect` and torn down on `disconnect`; nothing is
/// pooled or reused.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    headers: reqwest::header::HeaderMap,
    session_id: Option<String>,
    request_id: u64,
    connected: bool,
}

impl HttpTransport {
    /// Build a transport for a resolved server entry.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a configured header name or value is
    /// not representable on the wire.
    pub fn new(client: reqwest::Client, config: &ServerConfig) -> Result<Self> {
        use reqwest::header::{HeaderName, HeaderValue};

        let mut headers = reqwest::header::HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                BridgeError::Configuration(format!("invalid header name '{name}': {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                BridgeError::Configuration(format!("invalid value for header '{name}': {e}"))
            })?;
            headers.insert(name, value);
        }

        Ok(Self {
            client,
            url: config.url.clone(),
            headers,
            session_id: None,
            request_id: 0,
            connected: false,
        })
    }

    fn next_id(&mut self) -> u64 {
        self.request_id += 1;
        self.request_id
    }

    /// POST one JSON body to the endpoint, returning the response.
    async fn post(&self, body: &Value) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let mut request = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .header("accept", "application/json, text/event-stream")
            .json(body);

        if let Some(session) = &self.session_id {
            request = request.header("mcp-session-id", session.clone());
        }

        request.send().await
    }

    /// Send a request and decode the JSON-RPC response body.
    async fn round_trip(&self, request: &Request) -> Result<(Response, Option<String>)> {
        let body = serde_json::to_value(request)
            .map_err(|e| BridgeError::Tool(format!("failed to encode request: {e}")))?;

        let response = self
            .post(&body)
            .await
            .map_err(|e| self.classify(format!("request to {} failed: {e}", self.url)))?;

        let session = response
            .headers()
            .get("mcp-session-id")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.classify(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(self.classify(format!("server returned {status}: {text}")));
        }

        let decoded = parse_rpc_body(&text)
            .ok_or_else(|| self.classify(format!("unparseable response body: {text}")))?;

        Ok((decoded, session))
    }

    /// Failures before the handshake completes are connection errors;
    /// everything after is attributed to the tool call.
    fn classify(&self, message: String) -> BridgeError {
        if self.connected {
            BridgeError::Tool(message)
        } else {
            BridgeError::Connection(message)
        }
    }
}

#[async_trait]
impl ToolTransport for HttpTransport {
    async fn connect(&mut self) -> Result<()> {
        let id = self.next_id();
        let request = Request::initialize(id, "mcp-bridge", env!("CARGO_PKG_VERSION"));

        let (response, session) = self.round_trip(&request).await?;
        let result = response
            .into_result()
            .map_err(|e| BridgeError::Connection(format!("initialize rejected: {e}")))?;

        self.session_id = session;

        if let Some(info) = result.get("serverInfo") {
            tracing::debug!(url = %self.url, server_info = %info, "MCP session established");
        }

        // Servers expect the initialized notification before tool calls;
        // a missing body or 202 response here is normal.
        let notification = Request::initialized();
        self.post(&notification)
            .await
            .map_err(|e| BridgeError::Connection(format!("initialized notification: {e}")))?;

        self.connected = true;
        Ok(())
    }

    async fn call_tool(&mut self, name: &str, arguments: &Value) -> Result<Value> {
        if !self.connected {
            return Err(BridgeError::Tool("transport not connected".to_string()));
        }

        let id = self.next_id();
        let request = Request::call_tool(id, name, arguments);

        let (response, _) = self.round_trip(&request).await?;
        let result = response
            .into_result()
            .map_err(|e| BridgeError::Tool(e.to_string()))?;

        let call: ToolCallResult = serde_json::from_value(result)
            .map_err(|e| BridgeError::Tool(format!("malformed tool result: {e}")))?;

        if call.is_error {
            return Err(BridgeError::Tool(call.to_message()));
        }

        Ok(call.into_payload())
    }

    async fn disconnect(&mut self) {
        if !self.connected && self.session_id.is_none() {
            return;
        }
        self.connected = false;

        // Best-effort session teardown; the server also expires sessions.
        if let Some(session) = self.session_id.take() {
            let result = self
                .client
                .delete(&self.url)
                .headers(self.headers.clone())
                .header("mcp-session-id", session)
                .send()
                .await;

            if let Err(e) = result {
                tracing::debug!(url = %self.url, error = %e, "session delete failed");
            }
        }
    }
}

/// Decode a JSON-RPC response from either a plain JSON body or an SSE
/// stream of `data:` frames (servers answer in both forms).
fn parse_rpc_body(text: &str) -> Option<Response> {
    if let Ok(response) = serde_json::from_str::<Response>(text) {
        return Some(response);
    }

    text.lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .find_map(|data| serde_json::from_str::<Response>(data).ok())
}
