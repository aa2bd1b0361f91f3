// Shared transport configuration for building reqwest::Client instances.
//
// The controller is a bare ESP32 HTTP server on the LAN: no TLS, no auth,
// no cookies. What matters is the bounded per-request timeout — a wedged
// device must never stall a poll cycle indefinitely.

use std::time::Duration;

/// Transport configuration for the device HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout. Applies to every manifest fetch, status
    /// fetch, and command write.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("mada-api/0.1.0")
            .build()
            .map_err(crate::error::Error::Transport)
    }
}
