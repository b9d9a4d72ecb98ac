//! Result envelope: the fixed JSON success/failure wrapper every
//! invocation prints to stdout.

use std::process::ExitCode;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::config::ServerConfig;
use crate::error::BridgeError;

/// Key under which the success payload is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKey {
    /// `data` — the default for single-document payloads.
    Data,
    /// `results` — used by search-style tools.
    Results,
}

/// Identifying fields echoed alongside a success payload.
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    /// Tool name as invoked.
    pub tool: String,
    /// Resolved server entry name.
    pub server: String,
    /// Endpoint the call went to.
    pub url: String,
    /// Wall-clock formatting time, UTC, second precision.
    pub timestamp: String,
}

/// The external contract: shape is fully determined by `success`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResultEnvelope {
    Success {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        results: Option<Value>,
        metadata: Metadata,
    },
    Failure {
        success: bool,
        error: String,
        error_type: &'static str,
    },
}

impl ResultEnvelope {
    /// Wrap a successful tool payload.
    #[must_use]
    pub fn success(payload: Value, key: PayloadKey, tool: &str, server: &ServerConfig) -> Self {
        let (data, results) = match key {
            PayloadKey::Data => (Some(payload), None),
            PayloadKey::Results => (None, Some(payload)),
        };

        Self::Success {
            success: true,
            data,
            results,
            metadata: Metadata {
                tool: tool.to_string(),
                server: server.name.clone(),
                url: server.url.clone(),
                timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            },
        }
    }

    /// Wrap a failure.
    #[must_use]
    pub fn failure(error: &BridgeError) -> Self {
        Self::Failure {
            success: false,
            error: error.to_string(),
            error_type: error.error_type(),
        }
    }

    /// Whether this envelope reports success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Process exit code agreeing with the `success` boolean.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}
