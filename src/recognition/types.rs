use serde::{Deserialize, Serialize};

/// One recognized word with its offsets from stream start, in seconds
/// (sub-second precision).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTiming {
    pub word: String,
    pub start_secs: f64,
    pub end_secs: f64,
}

/// A candidate transcription for one result window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionAlternative {
    pub transcript: String,
    /// Engine confidence in [0, 1]. Interim results leave this at 0.
    #[serde(default)]
    pub confidence: f32,
    /// Word timings; populated only on final windows.
    #[serde(default)]
    pub words: Vec<WordTiming>,
}

/// One result window from the engine, interim or final.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Candidate transcriptions, best first. May be empty on degenerate
    /// engine output; the enricher drops such results.
    #[serde(default)]
    pub alternatives: Vec<RecognitionAlternative>,
    #[serde(default)]
    pub is_final: bool,
}

impl RecognitionResult {
    /// An interim window carrying a single candidate transcript.
    pub fn interim(transcript: impl Into<String>) -> Self {
        Self {
            alternatives: vec![RecognitionAlternative {
                transcript: transcript.into(),
                confidence: 0.0,
                words: Vec::new(),
            }],
            is_final: false,
        }
    }

    /// A final window carrying a single candidate with timings.
    pub fn final_window(
        transcript: impl Into<String>,
        confidence: f32,
        words: Vec<WordTiming>,
    ) -> Self {
        Self {
            alternatives: vec![RecognitionAlternative {
                transcript: transcript.into(),
                confidence,
                words,
            }],
            is_final: true,
        }
    }
}
