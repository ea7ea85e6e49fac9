use crate::recommendation::{AnswerSet, RecommendationEngine, ScoringPolicy};

pub(super) fn engine() -> RecommendationEngine {
    RecommendationEngine::new(ScoringPolicy::default())
}

pub(super) fn answers(pairs: &[(&str, &str)]) -> AnswerSet {
    pairs.iter().copied().collect()
}

/// Totals aa=10, ai=2, hl=1, sl=9.
pub(super) fn analysis_standard_answers() -> AnswerSet {
    answers(&[
        ("question1", "A"),
        ("question2", "A"),
        ("question5", "B"),
        ("question6", "C"),
        ("question7", "C"),
        ("question9", "C"),
        ("question10", "C"),
        ("question11", "D"),
        ("question13", "D"),
    ])
}

/// Totals aa=3, ai=3, hl=2, sl=2.
pub(super) fn evenly_split_answers() -> AnswerSet {
    answers(&[("question1", "C"), ("question2", "A"), ("question4", "C")])
}

/// Totals aa=-4, ai=-3, hl=-6, sl=6.
pub(super) fn low_workload_answers() -> AnswerSet {
    answers(&[("question11", "D"), ("question12", "D")])
}
