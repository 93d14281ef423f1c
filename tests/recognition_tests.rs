// Tests for the engine wire types: message field names must match what the
// recognition bridge publishes and consumes.

use base64::Engine as _;
use speech_relay::recognition::messages::{
    AudioChunkMessage, StreamResultMessage, StreamStartMessage,
};
use speech_relay::recognition::{AudioEncoding, RecognitionConfig, RecognitionResult};

#[test]
fn audio_chunk_serialization() {
    let msg = AudioChunkMessage {
        stream_id: "stream-1".to_string(),
        sequence: 0,
        audio: base64::engine::general_purpose::STANDARD.encode([0u8; 100]),
        timestamp: "2026-08-06T14:30:00Z".to_string(),
        final_chunk: false,
    };

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("stream-1"));
    assert!(json.contains("\"final\":false"));
    assert!(json.contains("\"sequence\":0"));

    let deserialized: AudioChunkMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.stream_id, "stream-1");
    assert_eq!(deserialized.sequence, 0);
    assert!(!deserialized.final_chunk);
    assert_eq!(
        base64::engine::general_purpose::STANDARD
            .decode(&deserialized.audio)
            .unwrap(),
        vec![0u8; 100]
    );
}

#[test]
fn audio_chunk_final_marker() {
    let msg = AudioChunkMessage {
        stream_id: "stream-1".to_string(),
        sequence: 10,
        audio: String::new(), // Empty for final marker
        timestamp: "2026-08-06T14:30:00Z".to_string(),
        final_chunk: true,
    };

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"final\":true"));

    let deserialized: AudioChunkMessage = serde_json::from_str(&json).unwrap();
    assert!(deserialized.final_chunk);
    assert!(deserialized.audio.is_empty());
    assert_eq!(deserialized.sequence, 10);
}

#[test]
fn stream_start_carries_engine_config_names() {
    let msg = StreamStartMessage {
        stream_id: "stream-1".to_string(),
        config: RecognitionConfig::default(),
        timestamp: "2026-08-06T14:30:00Z".to_string(),
    };

    let json = serde_json::to_value(&msg).unwrap();
    let config = &json["config"];
    assert_eq!(config["encoding"], "WEBM_OPUS");
    assert_eq!(config["sampleRateHertz"], 16000);
    assert_eq!(config["languageCode"], "en-US");
    assert_eq!(config["enableAutomaticPunctuation"], true);
    assert_eq!(config["enableWordTimeOffsets"], true);
    assert_eq!(config["interimResults"], true);
}

#[test]
fn result_message_with_interim_window() {
    let json = r#"{
        "stream_id": "stream-1",
        "result": {
            "alternatives": [{"transcript": "hel"}],
            "is_final": false
        }
    }"#;

    let msg: StreamResultMessage = serde_json::from_str(json).unwrap();
    assert!(!msg.end_of_stream);
    assert!(msg.error.is_none());

    let result = msg.result.unwrap();
    assert!(!result.is_final);
    // Absent confidence and words default rather than fail.
    assert_eq!(result.alternatives[0].confidence, 0.0);
    assert!(result.alternatives[0].words.is_empty());
}

#[test]
fn result_message_with_word_timings() {
    let json = r#"{
        "stream_id": "stream-1",
        "result": {
            "alternatives": [{
                "transcript": "hello world",
                "confidence": 0.92,
                "words": [
                    {"word": "hello", "start_secs": 0.0, "end_secs": 1.0},
                    {"word": "world", "start_secs": 1.0, "end_secs": 2.0}
                ]
            }],
            "is_final": true
        }
    }"#;

    let msg: StreamResultMessage = serde_json::from_str(json).unwrap();
    let result = msg.result.unwrap();
    assert!(result.is_final);
    assert_eq!(result.alternatives[0].words.len(), 2);
    assert_eq!(result.alternatives[0].words[1].end_secs, 2.0);
}

#[test]
fn result_message_end_marker() {
    let json = r#"{"stream_id": "stream-1", "end": true}"#;

    let msg: StreamResultMessage = serde_json::from_str(json).unwrap();
    assert!(msg.end_of_stream);
    assert!(msg.result.is_none());
    assert!(msg.error.is_none());
}

#[test]
fn result_message_error_marker() {
    let json = r#"{"stream_id": "stream-1", "error": "audio timeout"}"#;

    let msg: StreamResultMessage = serde_json::from_str(json).unwrap();
    assert_eq!(msg.error.as_deref(), Some("audio timeout"));
    assert!(!msg.end_of_stream);
}

#[test]
fn degenerate_result_deserializes_with_defaults() {
    let result: RecognitionResult = serde_json::from_str("{}").unwrap();
    assert!(result.alternatives.is_empty());
    assert!(!result.is_final);
}

#[test]
fn encoding_names_follow_engine_contract() {
    assert_eq!(
        serde_json::to_value(AudioEncoding::WebmOpus).unwrap(),
        "WEBM_OPUS"
    );
    assert_eq!(
        serde_json::to_value(AudioEncoding::Linear16).unwrap(),
        "LINEAR16"
    );
    let parsed: AudioEncoding = serde_json::from_str("\"OGG_OPUS\"").unwrap();
    assert_eq!(parsed, AudioEncoding::OggOpus);
}
