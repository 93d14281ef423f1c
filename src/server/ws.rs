//! WebSocket adapter
//!
//! Maps the relay's named events onto WebSocket frames:
//! - inbound binary frame = one opaque audio chunk
//! - inbound text frame `{"event":"client_completed"}` = completion signal
//! - outbound text frames `{"event":"transcript","data":{...}}` and
//!   `{"event":"server_completed"}`
//! - close frame or socket error = disconnect
//!
//! The session itself is transport-agnostic; this module only bridges
//! frames to its typed event channels.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{FromRequestParts, Query, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::auth::Identity;
use crate::relay::{ClientEvent, RelaySession, ServerEvent};
use crate::transcript::TranscriptEvent;

use super::state::AppState;

/// Buffering between the socket tasks and the session loop.
const EVENT_BUFFER: usize = 64;

/// Query parameters accepted on the stream upgrade.
#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Named events sent to the client as text frames.
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
enum OutboundFrame {
    Transcript(TranscriptEvent),
    ServerCompleted,
}

/// Control events received from the client as text frames.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum InboundFrame {
    ClientCompleted,
}

/// Credential gate as a request extractor.
///
/// Running the gate as an extractor guarantees it is evaluated before the
/// `WebSocketUpgrade` extractor, so a rejected token is refused with 401
/// before the upgrade is attempted or any session resource exists.
pub(crate) struct GateIdentity(Identity);

#[async_trait::async_trait]
impl FromRequestParts<AppState> for GateIdentity {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<StreamQuery>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match state.gate.authenticate(query.token.as_deref()) {
            Ok(identity) => Ok(GateIdentity(identity)),
            Err(e) => {
                warn!("Rejected connection attempt: {}", e);
                Err((
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: e.to_string(),
                    }),
                )
                    .into_response())
            }
        }
    }
}

/// GET /v1/stream
///
/// Runs the credential gate, then upgrades and binds the connection to a
/// relay session. Rejections happen before any session resource exists.
pub async fn stream_handler(
    State(state): State<AppState>,
    GateIdentity(identity): GateIdentity,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| relay_connection(socket, state, identity))
}

/// Drive one authenticated connection end to end.
async fn relay_connection(mut socket: WebSocket, state: AppState, identity: Identity) {
    let stream = match state.engine.open_stream(&state.recognition).await {
        Ok(stream) => stream,
        Err(e) => {
            error!("Failed to open recognition stream: {}", e);
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };

    let (mut ws_tx, mut ws_rx) = socket.split();
    let (event_tx, mut event_rx) = mpsc::channel::<ServerEvent>(EVENT_BUFFER);
    let (client_tx, client_rx) = mpsc::channel::<ClientEvent>(EVENT_BUFFER);

    // Outbound: session events out as text frames.
    let writer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let frame = match event {
                ServerEvent::Transcript(event) => OutboundFrame::Transcript(event),
                ServerEvent::ServerCompleted => OutboundFrame::ServerCompleted,
            };

            match serde_json::to_string(&frame) {
                Ok(json) => {
                    if ws_tx.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!("Failed to serialize outbound frame: {}", e),
            }
        }
    });

    // Inbound: frames in as typed client events. A socket error or EOF
    // counts as disconnect; dropping the sender signals it either way.
    let reader = tokio::spawn(async move {
        while let Some(Ok(message)) = ws_rx.next().await {
            let event = match message {
                Message::Binary(chunk) => Some(ClientEvent::Audio(Bytes::from(chunk))),
                Message::Text(text) => match serde_json::from_str::<InboundFrame>(&text) {
                    Ok(InboundFrame::ClientCompleted) => Some(ClientEvent::ClientCompleted),
                    Err(e) => {
                        warn!("Ignoring unrecognized text frame: {}", e);
                        None
                    }
                },
                Message::Close(_) => {
                    let _ = client_tx.send(ClientEvent::Disconnected).await;
                    break;
                }
                Message::Ping(_) | Message::Pong(_) => None,
            };

            if let Some(event) = event {
                if client_tx.send(event).await.is_err() {
                    // Session already closed.
                    break;
                }
            }
        }
    });

    let session = RelaySession::new(identity, stream, event_tx, state.idle_timeout);
    let session_id = session.id();

    info!("Client connected: session {}", session_id);

    let stats = session.run(client_rx).await;

    info!(
        "Client session {} finished: {:?} after {:.1}s",
        session_id, stats.disposition, stats.duration_secs
    );

    // The session is gone; stop reading and let the writer drain.
    reader.abort();
    let _ = writer.await;
}
