//! Error taxonomy for the bridge pipeline.

/// Bridge error type.
///
/// One variant per failure class; the variant determines the `error_type`
/// tag surfaced in the result envelope.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// No matching HTTP server entry, or a settings file is unparseable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network-level failure establishing the connection.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The remote server rejected the tool call after a successful connect.
    #[error("tool call failed: {0}")]
    Tool(String),

    /// The protocol client could not be made available.
    #[error("client unavailable: {0}")]
    Dependency(String),
}

impl BridgeError {
    /// The fixed tag reported as `error_type` in the result envelope.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "ConfigurationError",
            Self::Connection(_) => "ConnectionError",
            Self::Tool(_) => "ToolError",
            Self::Dependency(_) => "DependencyError",
        }
    }
}

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
