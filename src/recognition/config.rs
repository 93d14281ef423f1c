use serde::{Deserialize, Serialize};

/// Audio encodings the engine accepts for the inbound chunk stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    #[default]
    WebmOpus,
    OggOpus,
    Linear16,
    Flac,
}

/// Configuration template for a recognition stream.
///
/// One immutable copy lives in the server state; every session opens its
/// stream with the same template. Field names follow the engine's wire
/// contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionConfig {
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
    pub language_code: String,
    pub enable_automatic_punctuation: bool,
    pub enable_word_time_offsets: bool,
    pub interim_results: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            encoding: AudioEncoding::WebmOpus,
            sample_rate_hertz: 16000,
            language_code: "en-US".to_string(),
            enable_automatic_punctuation: true,
            enable_word_time_offsets: true,
            interim_results: true,
        }
    }
}
