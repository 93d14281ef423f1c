//! Relay session management
//!
//! This module provides the `RelaySession` abstraction that binds one
//! client connection to one recognition stream for the connection's
//! lifetime:
//! - Forwards inbound audio chunks to the engine in arrival order
//! - Enriches recognition results into transcript events
//! - Drives the three termination paths (client completed, disconnect,
//!   upstream end/error) without leaking or half-closing the stream

mod events;
mod session;
mod stats;

pub use events::{ClientEvent, ServerEvent};
pub use session::{RelaySession, SessionState};
pub use stats::{SessionDisposition, SessionStats};
