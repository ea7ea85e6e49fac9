use super::catalog::QuestionCatalog;
use super::domain::{AnswerSet, ScoreTally};
use super::policy::OverrideKind;

pub(crate) fn tally_answers(catalog: &QuestionCatalog, answers: &AnswerSet) -> ScoreTally {
    answers
        .iter()
        .filter_map(|(question_id, option)| catalog.effect_for(question_id, option))
        .fold(ScoreTally::default(), |mut tally, effect| {
            tally.apply(effect);
            tally
        })
}

/// Override kinds whose sentinel appears among the selected options, in check order.
pub fn detect_overrides(answers: &AnswerSet) -> Vec<OverrideKind> {
    OverrideKind::ALL
        .into_iter()
        .filter(|kind| answers.values().any(|option| option == kind.sentinel()))
        .collect()
}
