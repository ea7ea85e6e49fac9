use serde::{Deserialize, Serialize};

use super::advice::advice_for;
use super::config::ScoringPolicy;
use super::domain::{Course, Level, RecommendationDetails, RecommendationResult, ScoreTally};

const FORCED_CONFIDENCE: u8 = 100;

/// Answer values that replace the score-based outcome for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideKind {
    /// University entry requirements demand Higher Level.
    HigherLevelRequired,
    /// The student strongly dislikes pure, proof-driven mathematics.
    PureMathAversion,
}

impl OverrideKind {
    /// Detection order, which is also the order messages are reported in.
    pub const ALL: [OverrideKind; 2] = [
        OverrideKind::HigherLevelRequired,
        OverrideKind::PureMathAversion,
    ];

    pub const fn sentinel(self) -> &'static str {
        match self {
            OverrideKind::HigherLevelRequired => "require_hl",
            OverrideKind::PureMathAversion => "pure_math_dislike",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            OverrideKind::HigherLevelRequired => {
                "University entry requirements call for HL: level set to HL"
            }
            OverrideKind::PureMathAversion => {
                "Strong dislike of pure mathematics: course set to AI"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lean {
    First,
    Second,
    Even,
}

fn lean(first: i32, second: i32, margin: i32) -> Lean {
    let margin = margin.max(0);
    if first > second.saturating_add(margin) {
        Lean::First
    } else if second > first.saturating_add(margin) {
        Lean::Second
    } else {
        Lean::Even
    }
}

fn axis_confidence(lean: Lean, first: i32, second: i32, policy: &ScoringPolicy) -> u8 {
    match lean {
        Lean::Even => policy.tie_confidence.min(FORCED_CONFIDENCE),
        Lean::First => margin_confidence(first, second),
        Lean::Second => margin_confidence(second, first),
    }
}

/// Lead as a share of the combined score. Zero when the combined score is not positive.
fn margin_confidence(winner: i32, loser: i32) -> u8 {
    let total = i64::from(winner) + i64::from(loser);
    if total <= 0 {
        return 0;
    }

    let gap = i64::from(winner) - i64::from(loser);
    let pct = gap as f64 / total as f64 * 100.0;
    pct.round().clamp(0.0, 100.0) as u8
}

fn mean_confidence(course: u8, level: u8) -> u8 {
    ((u16::from(course) + u16::from(level) + 1) / 2) as u8
}

pub(crate) fn decide_recommendation(
    tally: &ScoreTally,
    overrides: &[OverrideKind],
    policy: &ScoringPolicy,
) -> RecommendationResult {
    let course_lean = lean(tally.aa, tally.ai, policy.decision_margin);
    let mut course = match course_lean {
        Lean::First => Course::Analysis,
        Lean::Second => Course::Applications,
        Lean::Even => Course::Tie,
    };
    let mut course_confidence = axis_confidence(course_lean, tally.aa, tally.ai, policy);

    let level_lean = lean(tally.hl, tally.sl, policy.decision_margin);
    let mut level = match level_lean {
        Lean::First => Level::Higher,
        Lean::Second => Level::Standard,
        Lean::Even => Level::Tie,
    };
    let mut level_confidence = axis_confidence(level_lean, tally.hl, tally.sl, policy);

    for kind in overrides {
        match kind {
            OverrideKind::HigherLevelRequired => {
                level = Level::Higher;
                level_confidence = FORCED_CONFIDENCE;
            }
            OverrideKind::PureMathAversion => {
                course = Course::Applications;
                course_confidence = FORCED_CONFIDENCE;
            }
        }
    }

    let overall_confidence = mean_confidence(course_confidence, level_confidence);
    let borderline = course == Course::Tie
        || level == Level::Tie
        || course_confidence < policy.borderline_threshold
        || level_confidence < policy.borderline_threshold;

    let text = advice_for(course, level);

    RecommendationResult {
        course,
        level,
        course_confidence,
        level_confidence,
        overall_confidence,
        details: RecommendationDetails {
            focus: text.focus.to_string(),
            style: text.style.to_string(),
            advice: text.advice.to_string(),
            overrides: overrides
                .iter()
                .map(|kind| kind.message().to_string())
                .collect(),
            borderline,
        },
    }
}
