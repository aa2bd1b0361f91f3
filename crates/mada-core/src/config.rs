// ── Runtime session configuration ──
//
// Describes *how* to reach one irrigation controller. Built by the host
// collaborator and handed to `Session::establish` -- core never reads
// config files (persistence is the host's concern).

use std::time::Duration;

/// Configuration for one device session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Device host or host:port (e.g. `"192.168.4.20"`).
    pub host: String,
    /// Periodic status-poll interval.
    pub poll_interval: Duration,
    /// Bounded timeout for every request (manifest, status, commands).
    pub timeout: Duration,
}

impl SessionConfig {
    /// Config for `host` with default polling and timeout.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: "192.168.4.1".into(),
            poll_interval: Duration::from_secs(30),
            timeout: Duration::from_secs(10),
        }
    }
}
