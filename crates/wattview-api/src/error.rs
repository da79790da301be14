use thiserror::Error;

/// Top-level error type for the `wattview-api` crate.
///
/// Covers every failure mode of the three backend calls: transport
/// (request never completed), response (non-2xx status), and decode
/// (malformed body). `wattview-core` maps these into user-facing
/// diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Response ────────────────────────────────────────────────────
    /// The backend answered with a non-2xx status. The body is kept
    /// verbatim so callers can surface or log it.
    #[error("Backend error (HTTP {status})")]
    Response { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Decode error: {message}")]
    Decode { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Response { status, .. } => matches!(status, 502 | 503 | 504),
            _ => false,
        }
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
