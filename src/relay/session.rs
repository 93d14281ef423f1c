use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::Identity;
use crate::recognition::{RecognitionResult, RecognitionStream};
use crate::transcript::{enrich_final, enrich_interim, RateTracker, TranscriptEvent};

use super::events::{ClientEvent, ServerEvent};
use super::stats::{SessionDisposition, SessionStats};

/// Lifecycle of a relay session.
///
/// `Connecting` covers the transport handshake before the credential gate
/// runs; a `RelaySession` is only constructed once the gate has passed and
/// a recognition stream exists, so it starts in `Authenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Authenticated,
    Streaming,
    Closing,
    Closed,
}

/// What woke the session loop.
enum Wake {
    Client(Option<ClientEvent>),
    Engine(Option<crate::recognition::ResultItem>),
    Idle,
}

/// One client connection's audio-to-transcript relay.
///
/// Owns its recognition stream and rate tracker exclusively and drives all
/// data flow from a single event loop: inbound client events, recognition
/// results and the optional idle deadline. Closing the stream is the only
/// synchronization point between the two flows and is idempotent.
pub struct RelaySession {
    id: Uuid,
    identity: Identity,
    stream: RecognitionStream,
    rate: RateTracker,
    state: SessionState,
    events: mpsc::Sender<ServerEvent>,
    idle_timeout: Option<Duration>,
    started_at: chrono::DateTime<Utc>,
    chunks_forwarded: usize,
    interim_events: usize,
    final_events: usize,
}

impl RelaySession {
    pub fn new(
        identity: Identity,
        stream: RecognitionStream,
        events: mpsc::Sender<ServerEvent>,
        idle_timeout: Option<Duration>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            stream,
            rate: RateTracker::new(),
            state: SessionState::Authenticated,
            events,
            idle_timeout,
            started_at: Utc::now(),
            chunks_forwarded: 0,
            interim_events: 0,
            final_events: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run the session until it closes, returning final accounting.
    pub async fn run(mut self, mut inbound: mpsc::Receiver<ClientEvent>) -> SessionStats {
        info!(
            "Session {} streaming (subject: {})",
            self.id,
            self.identity.subject.as_deref().unwrap_or("-")
        );
        self.state = SessionState::Streaming;

        let disposition = loop {
            // Every wake except the deadline itself counts as activity, so
            // the idle window restarts each iteration.
            let deadline = self.idle_timeout.map(|timeout| Instant::now() + timeout);

            let wake = {
                let idle = async {
                    match deadline {
                        Some(deadline) => sleep_until(deadline).await,
                        None => std::future::pending().await,
                    }
                };

                tokio::select! {
                    event = inbound.recv() => Wake::Client(event),
                    result = self.stream.next_result() => Wake::Engine(result),
                    _ = idle => Wake::Idle,
                }
            };

            match wake {
                Wake::Client(Some(ClientEvent::Audio(chunk))) => {
                    match self.stream.write_audio(chunk).await {
                        Ok(()) => self.chunks_forwarded += 1,
                        // Audio after completion or with a dead engine is dropped.
                        Err(e) => debug!("Session {} dropping audio chunk: {}", self.id, e),
                    }
                }
                Wake::Client(Some(ClientEvent::ClientCompleted)) => {
                    // Close the audio side only; keep draining results the
                    // engine still flushes.
                    debug!("Session {} client completed", self.id);
                    self.begin_close();
                }
                Wake::Client(Some(ClientEvent::Disconnected)) | Wake::Client(None) => {
                    // Nobody left to notify.
                    self.begin_close();
                    break SessionDisposition::Disconnected;
                }
                Wake::Engine(Some(Ok(result))) => {
                    self.handle_result(result).await;
                }
                Wake::Engine(Some(Err(e))) => {
                    // Equivalent to stream end; the erroring result produces
                    // no transcript event.
                    warn!("Session {} recognition stream error: {}", self.id, e);
                    self.begin_close();
                    self.emit(ServerEvent::ServerCompleted).await;
                    break SessionDisposition::UpstreamError;
                }
                Wake::Engine(None) => {
                    self.begin_close();
                    self.emit(ServerEvent::ServerCompleted).await;
                    break SessionDisposition::UpstreamEnded;
                }
                Wake::Idle => {
                    info!("Session {} exceeded idle window, closing", self.id);
                    self.begin_close();
                    self.emit(ServerEvent::ServerCompleted).await;
                    break SessionDisposition::IdleTimeout;
                }
            }
        };

        self.state = SessionState::Closed;

        let stats = SessionStats {
            session_id: self.id.to_string(),
            started_at: self.started_at,
            duration_secs: Utc::now()
                .signed_duration_since(self.started_at)
                .num_milliseconds() as f64
                / 1000.0,
            chunks_forwarded: self.chunks_forwarded,
            interim_events: self.interim_events,
            final_events: self.final_events,
            disposition,
        };

        info!(
            "Session {} closed: {:?} ({} chunks, {} interim, {} final)",
            self.id,
            stats.disposition,
            stats.chunks_forwarded,
            stats.interim_events,
            stats.final_events
        );

        stats
    }

    /// Enter `Closing` and shut the recognition stream's audio side.
    /// Idempotent: a second trigger is a no-op.
    fn begin_close(&mut self) {
        if self.state != SessionState::Closed {
            self.state = SessionState::Closing;
        }
        self.stream.close();
    }

    /// Enrich one recognition result and emit the transcript event, in the
    /// order results arrive from the engine.
    async fn handle_result(&mut self, result: RecognitionResult) {
        if result.is_final {
            let Some(segment) = enrich_final(&result) else {
                debug!("Session {} dropping empty final segment", self.id);
                return;
            };

            let average = match segment.segment_wpm {
                Some(wpm) => self.rate.update(wpm),
                // Zero-duration segment: no rate update, report the
                // existing estimate.
                None => self.rate.average(),
            };

            self.final_events += 1;
            self.emit(ServerEvent::Transcript(TranscriptEvent::finalized(
                segment.transcript,
                segment.confidence,
                segment.segment_wpm,
                average,
            )))
            .await;
        } else if let Some(event) = enrich_interim(&result) {
            self.interim_events += 1;
            self.emit(ServerEvent::Transcript(event)).await;
        }
    }

    /// Deliver an event to the transport. A send failure means the client
    /// side is gone; the event is silently dropped.
    async fn emit(&self, event: ServerEvent) {
        if self.events.send(event).await.is_err() {
            debug!("Session {} transport gone, dropping event", self.id);
        }
    }
}
