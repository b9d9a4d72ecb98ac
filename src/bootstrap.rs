//! Protocol client availability check.
//!
//! The one environment-mutating concern of the pipeline lives behind a
//! single capability so tests can stub it out entirely. With a statically
//! linked client the check reduces to verifying the HTTP/TLS stack can be
//! initialized; there is no install step to run, but the contract is the
//! same: verified once, before any connection attempt.

use crate::error::{BridgeError, Result};

/// Capability to make the protocol client available.
pub trait Bootstrap {
    /// Verify the client is usable, provisioning it if needed.
    ///
    /// # Errors
    ///
    /// Returns `DependencyError` when the client cannot be made available;
    /// no connection attempt may follow.
    fn ensure_available(&self) -> Result<()>;
}

/// Bootstrap for the built-in `reqwest` client.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientBootstrap;

impl ClientBootstrap {
    /// Construct the verified HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `DependencyError` if the TLS backend cannot be initialized.
    pub fn client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .build()
            .map_err(|e| BridgeError::Dependency(format!("HTTP client initialization failed: {e}")))
    }
}

impl Bootstrap for ClientBootstrap {
    fn ensure_available(&self) -> Result<()> {
        self.client().map(|_| ())
    }
}
