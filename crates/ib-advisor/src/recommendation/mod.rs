//! Questionnaire scoring and IB Mathematics course recommendation.
//!
//! Answers are folded against the static question catalog into four axis totals
//! (AA/AI for the course, HL/SL for the level). The decision step compares each
//! pair, derives a 0-100 confidence from the lead, applies any override answers
//! and picks the advice text. Everything here is pure: no I/O and no errors.

mod advice;
pub mod catalog;
mod config;
pub mod domain;
mod policy;
mod rules;

#[cfg(test)]
mod tests;

pub use catalog::{QuestionCatalog, QuestionConfig};
pub use config::ScoringPolicy;
pub use domain::{
    AnswerSet, Course, Level, QuestionCategory, RecommendationDetails, RecommendationResult,
    ScoreEffect, ScoreTally,
};
pub use policy::OverrideKind;
pub use rules::detect_overrides;

use policy::decide_recommendation;
use tracing::debug;

/// Stateless recommender over a question catalog and scoring policy.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    policy: ScoringPolicy,
    catalog: &'static QuestionCatalog,
}

impl RecommendationEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self::with_catalog(policy, QuestionCatalog::standard())
    }

    pub fn with_catalog(policy: ScoringPolicy, catalog: &'static QuestionCatalog) -> Self {
        Self { policy, catalog }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn catalog(&self) -> &'static QuestionCatalog {
        self.catalog
    }

    /// Axis totals for `answers`. Unknown question ids and option labels add nothing.
    pub fn tally(&self, answers: &AnswerSet) -> ScoreTally {
        rules::tally_answers(self.catalog, answers)
    }

    pub fn recommend(&self, answers: &AnswerSet) -> RecommendationResult {
        self.recommend_with_tally(answers).0
    }

    /// Recommendation together with the axis totals it was decided from.
    pub fn recommend_with_tally(
        &self,
        answers: &AnswerSet,
    ) -> (RecommendationResult, ScoreTally) {
        let tally = self.tally(answers);
        let overrides = detect_overrides(answers);
        let result = self.decide(&tally, &overrides);

        debug!(
            answers = answers.len(),
            aa = tally.aa,
            ai = tally.ai,
            hl = tally.hl,
            sl = tally.sl,
            course = result.course.code(),
            level = result.level.code(),
            overall_confidence = result.overall_confidence,
            "recommendation computed"
        );

        (result, tally)
    }

    /// Decision step over totals that were already accumulated.
    pub fn decide(&self, tally: &ScoreTally, overrides: &[OverrideKind]) -> RecommendationResult {
        decide_recommendation(tally, overrides, &self.policy)
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(ScoringPolicy::default())
    }
}

/// Recommendation for `answers` under the default policy and standard catalog.
pub fn compute_recommendation(answers: &AnswerSet) -> RecommendationResult {
    RecommendationEngine::default().recommend(answers)
}
