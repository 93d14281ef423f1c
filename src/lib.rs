pub mod auth;
pub mod config;
pub mod recognition;
pub mod relay;
pub mod server;
pub mod transcript;

pub use auth::{AuthError, CredentialGate, Identity};
pub use config::Config;
pub use recognition::{
    AudioEncoding, NatsEngine, RecognitionConfig, RecognitionEngine, RecognitionError,
    RecognitionResult, RecognitionStream, WordTiming,
};
pub use relay::{
    ClientEvent, RelaySession, ServerEvent, SessionDisposition, SessionState, SessionStats,
};
pub use server::{create_router, AppState};
pub use transcript::{enrich_final, enrich_interim, FinalSegment, RateTracker, TranscriptEvent};
