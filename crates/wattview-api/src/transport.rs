// Shared transport configuration for building reqwest::Client instances.
//
// The backend speaks plain HTTP on a LAN, so there is no TLS or auth
// knob here — just timeout and identification. Both the CLI and the TUI
// hand a TransportConfig to ApiClient::new.

use std::time::Duration;

/// Transport configuration for the backend HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout. A hung backend surfaces as a transport
    /// error instead of leaving the caller waiting forever.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("wattview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(crate::error::Error::Transport)
    }
}
