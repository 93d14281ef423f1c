use chrono::{DateTime, Utc};
use serde::Serialize;

/// What finally terminated a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionDisposition {
    /// The transport reported the client gone.
    Disconnected,
    /// The recognition stream ended on its own.
    UpstreamEnded,
    /// The recognition stream reported an error.
    UpstreamError,
    /// No traffic within the configured idle window.
    IdleTimeout,
}

/// Final accounting for one relay session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    /// Audio chunks forwarded to the recognition stream.
    pub chunks_forwarded: usize,
    /// Interim transcript events emitted.
    pub interim_events: usize,
    /// Final transcript events emitted (dropped empty segments excluded).
    pub final_events: usize,
    pub disposition: SessionDisposition,
}
