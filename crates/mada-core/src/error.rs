// ── Core error types ──
//
// User-facing errors from mada-core. These are NOT transport-specific --
// consumers never see reqwest errors or JSON parse failures directly.
// The `From<mada_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach device at {host}: {reason}")]
    ConnectionFailed { host: String, reason: String },

    #[error("Request to device timed out")]
    Timeout,

    // ── Poll errors ──────────────────────────────────────────────────
    /// A status poll cycle failed. Carried in `PollState` and surfaced
    /// to entity views as "unavailable".
    #[error("Status update failed: {reason}")]
    UpdateFailed { reason: String },

    // ── Write errors ─────────────────────────────────────────────────
    #[error("Entity {id} does not accept {operation} writes")]
    NotWritable { id: String, operation: &'static str },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// The device refused a command (non-200 response).
    #[error("Command rejected by device (HTTP {status})")]
    CommandRejected { status: u16 },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<mada_api::Error> for CoreError {
    fn from(err: mada_api::Error) -> Self {
        match err {
            mada_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        host: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::UpdateFailed {
                        reason: e.to_string(),
                    }
                }
            }
            mada_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid device URL: {e}"),
            },
            mada_api::Error::Status { status, .. } => CoreError::CommandRejected { status },
            mada_api::Error::Deserialization { message, body: _ } => CoreError::UpdateFailed {
                reason: format!("malformed device response: {message}"),
            },
        }
    }
}
