use serde::{Deserialize, Serialize};

/// Thresholds the decision step applies to the axis totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Points a side must lead by, beyond strictly greater, before it wins an axis.
    pub decision_margin: i32,
    /// Confidence reported for a tied axis, on the 0-100 scale.
    pub tie_confidence: u8,
    /// Confidences below this mark the recommendation as borderline.
    pub borderline_threshold: u8,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            decision_margin: 0,
            tie_confidence: 50,
            borderline_threshold: 35,
        }
    }
}
