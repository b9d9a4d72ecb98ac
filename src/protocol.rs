//! MCP JSON-RPC wire types for the streamable HTTP transport.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol revision spoken during the initialize handshake.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC request.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl Request {
    /// Create a new request.
    #[must_use]
    pub fn new(id: u64, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.into(),
            params,
        }
    }

    /// Create an initialize request.
    #[must_use]
    pub fn initialize(id: u64, client_name: &str, client_version: &str) -> Self {
        Self::new(
            id,
            "initialize",
            Some(serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {
                    "name": client_name,
                    "version": client_version
                }
            })),
        )
    }

    /// Create a tools/call request.
    #[must_use]
    pub fn call_tool(id: u64, name: &str, arguments: &Value) -> Self {
        Self::new(
            id,
            "tools/call",
            Some(serde_json::json!({
                "name": name,
                "arguments": arguments
            })),
        )
    }

    /// Create a notifications/initialized notification.
    #[must_use]
    pub fn initialized() -> Value {
        serde_json::json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        })
    }
}

/// JSON-RPC response.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<RpcError>,
}

impl Response {
    /// Get the result or the error object.
    pub fn into_result(self) -> Result<Value, RpcError> {
        if let Some(error) = self.error {
            Err(error)
        } else {
            Ok(self.result.unwrap_or(Value::Null))
        }
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MCP error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for RpcError {}

/// Result of a tools/call request.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallResult {
    #[serde(default)]
    pub content: Vec<Content>,
    #[serde(default, rename = "isError")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Extract the payload from the first content block.
    ///
    /// Text that parses as JSON is carried structurally; anything else is
    /// carried as a raw string.
    #[must_use]
    pub fn into_payload(self) -> Value {
        match self.content.into_iter().next() {
            Some(Content::Text { text }) => match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(_) => Value::String(text),
            },
            Some(other) => Value::String(other.to_text()),
            None => Value::Null,
        }
    }

    /// Flatten all content blocks into one message string.
    #[must_use]
    pub fn to_message(&self) -> String {
        self.content
            .iter()
            .map(Content::to_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// MCP content block.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text {
        text: String,
    },
    Image {
        #[allow(dead_code)]
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
    Resource {
        uri: String,
    },
}

impl Content {
    /// Convert to string representation.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Text { text } => text.clone(),
            Self::Image { mime_type, .. } => format!("[Image: {mime_type}]"),
            Self::Resource { uri } => format!("[Resource: {uri}]"),
        }
    }
}
