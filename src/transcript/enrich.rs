use crate::recognition::RecognitionResult;

use super::event::TranscriptEvent;

/// A final segment with derived timing metrics, ready to feed the rate
/// tracker and build the outbound event.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalSegment {
    pub transcript: String,
    /// Engine confidence, carried through unchanged.
    pub confidence: f32,
    /// Words per minute over the spoken time of this segment. `None` when
    /// the word timings sum to zero duration.
    pub segment_wpm: Option<f64>,
}

/// Enrich an interim result into a transcript event.
///
/// Interim results are not scored; only the text passes through. Returns
/// `None` when the engine sent no alternatives (nothing to relay).
pub fn enrich_interim(result: &RecognitionResult) -> Option<TranscriptEvent> {
    let alternative = result.alternatives.first()?;
    Some(TranscriptEvent::interim(alternative.transcript.clone()))
}

/// Enrich a final result with per-segment speaking rate.
///
/// Per-word durations (end minus start, seconds) are summed into the total
/// spoken time for the segment. Returns `None` (dropped, no event) when the
/// result has no alternatives or the top alternative carries no timed words.
pub fn enrich_final(result: &RecognitionResult) -> Option<FinalSegment> {
    let alternative = result.alternatives.first()?;
    if alternative.words.is_empty() {
        return None;
    }

    let spoken_secs: f64 = alternative
        .words
        .iter()
        .map(|word| word.end_secs - word.start_secs)
        .sum();
    let word_count = alternative.words.len();

    // Zero spoken time makes the rate undefined, not zero.
    let segment_wpm = if spoken_secs > 0.0 {
        Some(word_count as f64 / (spoken_secs / 60.0))
    } else {
        None
    };

    Some(FinalSegment {
        transcript: alternative.transcript.clone(),
        confidence: alternative.confidence,
        segment_wpm,
    })
}
