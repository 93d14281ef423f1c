use anyhow::{Context, Result};
use async_nats::Client;
use base64::Engine as _;
use bytes::Bytes;
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::messages::{AudioChunkMessage, StreamResultMessage, StreamStartMessage};
use super::stream::{RecognitionStream, ResultItem};
use super::{RecognitionConfig, RecognitionEngine, RecognitionError};

/// Subject carrying stream-open announcements.
const START_SUBJECT: &str = "recognition.start";

/// In-flight buffering between a session and the messaging tasks.
const AUDIO_BUFFER: usize = 64;
const RESULT_BUFFER: usize = 64;

/// Recognition engine reached over NATS.
///
/// Audio goes out on `recognition.audio.{stream_id}` as sequenced base64
/// chunk messages ending with an empty final marker; results come back on
/// `recognition.result.{stream_id}` until a terminal end/error message.
///
/// One engine instance is created at startup and shared by every session.
pub struct NatsEngine {
    client: Client,
}

impl NatsEngine {
    /// Connect to the NATS server backing the engine.
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to recognition engine at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to recognition engine");

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl RecognitionEngine for NatsEngine {
    async fn open_stream(
        &self,
        config: &RecognitionConfig,
    ) -> Result<RecognitionStream, RecognitionError> {
        let stream_id = Uuid::new_v4().to_string();
        let audio_subject = format!("recognition.audio.{}", stream_id);
        let result_subject = format!("recognition.result.{}", stream_id);

        // Subscribe before announcing so no result can slip past.
        let mut subscriber = self
            .client
            .subscribe(result_subject)
            .await
            .map_err(|e| RecognitionError::Transport(e.to_string()))?;

        let start = StreamStartMessage {
            stream_id: stream_id.clone(),
            config: config.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let payload =
            serde_json::to_vec(&start).map_err(|e| RecognitionError::Transport(e.to_string()))?;
        self.client
            .publish(START_SUBJECT.to_string(), payload.into())
            .await
            .map_err(|e| RecognitionError::Transport(e.to_string()))?;

        let (audio_tx, mut audio_rx) = mpsc::channel::<Bytes>(AUDIO_BUFFER);
        let (result_tx, result_rx) = mpsc::channel::<ResultItem>(RESULT_BUFFER);

        // Writer: forward chunks in arrival order, then mark the stream final.
        let client = self.client.clone();
        let writer_stream_id = stream_id.clone();
        tokio::spawn(async move {
            let mut sequence: u64 = 0;

            while let Some(chunk) = audio_rx.recv().await {
                let message = AudioChunkMessage {
                    stream_id: writer_stream_id.clone(),
                    sequence,
                    audio: base64::engine::general_purpose::STANDARD.encode(&chunk),
                    timestamp: chrono::Utc::now().to_rfc3339(),
                    final_chunk: false,
                };
                sequence += 1;

                let payload = match serde_json::to_vec(&message) {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!("Failed to serialize audio chunk message: {}", e);
                        continue;
                    }
                };

                if let Err(e) = client.publish(audio_subject.clone(), payload.into()).await {
                    warn!("Failed to publish audio chunk: {}", e);
                    break;
                }
            }

            // Empty final marker: no more audio is coming for this stream.
            let message = AudioChunkMessage {
                stream_id: writer_stream_id.clone(),
                sequence,
                audio: String::new(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                final_chunk: true,
            };
            match serde_json::to_vec(&message) {
                Ok(payload) => {
                    if let Err(e) = client.publish(audio_subject, payload.into()).await {
                        warn!("Failed to publish final audio marker: {}", e);
                    }
                }
                Err(e) => warn!("Failed to serialize final audio marker: {}", e),
            }

            debug!("Audio writer for stream {} finished", writer_stream_id);
        });

        // Reader: decode result messages until a terminal end/error.
        let reader_stream_id = stream_id.clone();
        tokio::spawn(async move {
            while let Some(msg) = subscriber.next().await {
                let message: StreamResultMessage = match serde_json::from_slice(&msg.payload) {
                    Ok(message) => message,
                    Err(e) => {
                        warn!("Failed to parse recognition result message: {}", e);
                        continue;
                    }
                };

                if message.stream_id != reader_stream_id {
                    continue;
                }

                if let Some(error) = message.error {
                    let _ = result_tx
                        .send(Err(RecognitionError::Upstream(error)))
                        .await;
                    break;
                }

                if message.end_of_stream {
                    break;
                }

                if let Some(result) = message.result {
                    if result_tx.send(Ok(result)).await.is_err() {
                        // Session side dropped the stream handle.
                        break;
                    }
                }
            }

            debug!("Result reader for stream {} finished", reader_stream_id);
        });

        info!("Opened recognition stream {}", stream_id);

        Ok(RecognitionStream::new(audio_tx, result_rx))
    }

    fn name(&self) -> &str {
        "nats"
    }
}
