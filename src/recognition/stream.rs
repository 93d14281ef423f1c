use bytes::Bytes;
use tokio::sync::mpsc;

use super::types::RecognitionResult;
use super::RecognitionError;

/// Item on the result side of a stream: a recognition result or an
/// upstream-reported error. The channel closing signals end-of-stream.
pub type ResultItem = Result<RecognitionResult, RecognitionError>;

/// Handle binding one session to one engine stream.
///
/// The write side accepts ordered audio chunks; the read side yields
/// recognition results. Exactly one handle exists per session and it is
/// never shared. `close` shuts the audio side and is idempotent; results
/// already in flight can still be drained afterwards.
pub struct RecognitionStream {
    audio_tx: Option<mpsc::Sender<Bytes>>,
    results: mpsc::Receiver<ResultItem>,
}

impl RecognitionStream {
    pub fn new(audio_tx: mpsc::Sender<Bytes>, results: mpsc::Receiver<ResultItem>) -> Self {
        Self {
            audio_tx: Some(audio_tx),
            results,
        }
    }

    /// Forward one audio chunk to the engine, preserving arrival order.
    pub async fn write_audio(&self, chunk: Bytes) -> Result<(), RecognitionError> {
        let audio_tx = self
            .audio_tx
            .as_ref()
            .ok_or(RecognitionError::StreamClosed)?;
        audio_tx
            .send(chunk)
            .await
            .map_err(|_| RecognitionError::StreamClosed)
    }

    /// Next result from the engine. `None` means the engine ended the
    /// stream.
    pub async fn next_result(&mut self) -> Option<ResultItem> {
        self.results.recv().await
    }

    /// Close the audio side. Safe to call any number of times.
    pub fn close(&mut self) {
        self.audio_tx.take();
    }

    pub fn is_closed(&self) -> bool {
        self.audio_tx.is_none()
    }
}
