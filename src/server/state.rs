use std::sync::Arc;
use std::time::Duration;

use crate::auth::CredentialGate;
use crate::recognition::{RecognitionConfig, RecognitionEngine};

/// Shared state for the relay's handlers.
///
/// Everything here is immutable configuration fixed at startup; sessions
/// share nothing mutable with each other.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<CredentialGate>,
    pub engine: Arc<dyn RecognitionEngine>,
    /// Per-stream configuration template, identical for every session.
    pub recognition: Arc<RecognitionConfig>,
    pub idle_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(
        gate: Arc<CredentialGate>,
        engine: Arc<dyn RecognitionEngine>,
        recognition: Arc<RecognitionConfig>,
        idle_timeout: Option<Duration>,
    ) -> Self {
        Self {
            gate,
            engine,
            recognition,
            idle_timeout,
        }
    }
}
