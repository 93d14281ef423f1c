/// Smoothed speaking-rate estimate for one session.
///
/// Exponential smoothing with factor 0.5 across successive final-segment
/// rates, without storing history. "No estimate yet" is a distinct state:
/// the first real segment rate is assigned directly rather than averaged
/// against a zero baseline.
#[derive(Debug, Clone, Default)]
pub struct RateTracker {
    smoothed: Option<f64>,
}

impl RateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one segment rate into the running estimate and return the new
    /// smoothed value. Must only be called with a real (non-absent) rate.
    pub fn update(&mut self, segment_wpm: f64) -> f64 {
        let next = match self.smoothed {
            None => segment_wpm,
            Some(current) => (current + segment_wpm) / 2.0,
        };
        self.smoothed = Some(next);
        next
    }

    /// Current smoothed rate, or 0 when no segment has produced one yet.
    pub fn average(&self) -> f64 {
        self.smoothed.unwrap_or(0.0)
    }
}
