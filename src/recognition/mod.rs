//! Recognition engine interface
//!
//! The relay treats speech recognition as an opaque streaming service: a
//! stream is opened with a fixed configuration, audio chunks are written in
//! order, and recognition results come back asynchronously until the engine
//! ends the stream or reports an error.
//!
//! `RecognitionEngine` is the seam; `NatsEngine` is the concrete
//! implementation bridging streams over NATS subjects.

pub mod config;
pub mod messages;
pub mod nats;
pub mod stream;
pub mod types;

pub use config::{AudioEncoding, RecognitionConfig};
pub use nats::NatsEngine;
pub use stream::{RecognitionStream, ResultItem};
pub use types::{RecognitionAlternative, RecognitionResult, WordTiming};

use thiserror::Error;

/// Errors surfaced by the recognition-engine bridge.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The engine reported a failure for this stream; terminal.
    #[error("engine reported stream error: {0}")]
    Upstream(String),
    /// The stream's audio side is closed; writes are no longer accepted.
    #[error("recognition stream is closed")]
    StreamClosed,
    /// Messaging-layer failure talking to the engine.
    #[error("engine transport failure: {0}")]
    Transport(String),
}

/// An opaque streaming speech-recognition service.
#[async_trait::async_trait]
pub trait RecognitionEngine: Send + Sync {
    /// Open one recognition stream with the given configuration.
    async fn open_stream(
        &self,
        config: &RecognitionConfig,
    ) -> Result<RecognitionStream, RecognitionError>;

    /// Engine name for logging.
    fn name(&self) -> &str;
}
