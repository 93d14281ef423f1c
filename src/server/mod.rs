//! Relay server surface
//!
//! This module accepts client connections and wires them to relay
//! sessions:
//! - GET /health - liveness check
//! - GET /v1/stream - authenticated WebSocket upgrade for one session
//!
//! The credential gate runs before the upgrade; a refused connection never
//! touches the recognition engine.

mod routes;
mod state;
mod ws;

pub use routes::create_router;
pub use state::AppState;
