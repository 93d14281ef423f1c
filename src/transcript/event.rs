use serde::Serialize;

/// Outbound transcript event delivered to the client.
///
/// The wire shape follows the client contract: interim events carry only the
/// text, final events add confidence and speaking-rate metrics. A missing
/// per-segment rate is omitted from the JSON entirely, never sent as 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TranscriptEvent {
    Interim {
        transcript: String,
        #[serde(rename = "isFinal")]
        is_final: bool,
    },
    Final {
        transcript: String,
        #[serde(rename = "isFinal")]
        is_final: bool,
        /// Engine-reported confidence in [0, 1].
        #[serde(rename = "speechClarity")]
        speech_clarity: f32,
        /// Speaking rate of this segment alone, words per minute.
        #[serde(rename = "speedWPM", skip_serializing_if = "Option::is_none")]
        speed_wpm: Option<f64>,
        /// Running smoothed speaking rate across the session.
        #[serde(rename = "averageSpeedWPM")]
        average_speed_wpm: f64,
    },
}

impl TranscriptEvent {
    pub fn interim(transcript: impl Into<String>) -> Self {
        Self::Interim {
            transcript: transcript.into(),
            is_final: false,
        }
    }

    pub fn finalized(
        transcript: impl Into<String>,
        speech_clarity: f32,
        speed_wpm: Option<f64>,
        average_speed_wpm: f64,
    ) -> Self {
        Self::Final {
            transcript: transcript.into(),
            is_final: true,
            speech_clarity,
            speed_wpm,
            average_speed_wpm,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final { .. })
    }
}
