use serde::{Deserialize, Serialize};

use super::config::RecognitionConfig;
use super::types::RecognitionResult;

/// Announces a new recognition stream and its configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct StreamStartMessage {
    pub stream_id: String,
    pub config: RecognitionConfig,
    pub timestamp: String, // RFC3339
}

/// One audio chunk published to the engine, base64-framed.
#[derive(Debug, Serialize, Deserialize)]
pub struct AudioChunkMessage {
    pub stream_id: String,
    pub sequence: u64,
    /// Base64-encoded chunk bytes. Empty on the final marker.
    pub audio: String,
    pub timestamp: String, // RFC3339
    #[serde(rename = "final")]
    pub final_chunk: bool,
}

/// One message on a stream's result subject.
///
/// A message carries a result, an upstream error, or an end-of-stream
/// marker; error and end both terminate the stream.
#[derive(Debug, Serialize, Deserialize)]
pub struct StreamResultMessage {
    pub stream_id: String,
    #[serde(default)]
    pub result: Option<RecognitionResult>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, rename = "end")]
    pub end_of_stream: bool,
}
