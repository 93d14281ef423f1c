use bytes::Bytes;

use crate::transcript::TranscriptEvent;

/// Inbound events from the client's transport connection.
#[derive(Debug)]
pub enum ClientEvent {
    /// One opaque audio chunk, forwarded to the engine in arrival order.
    Audio(Bytes),
    /// The client finished sending audio; results may still flow back.
    ClientCompleted,
    /// Transport-level closure; the client is gone.
    Disconnected,
}

/// Outbound events for the client's transport connection.
#[derive(Debug)]
pub enum ServerEvent {
    Transcript(TranscriptEvent),
    /// The recognition stream ended; no more transcripts will follow.
    ServerCompleted,
}
