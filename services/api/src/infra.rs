use ib_advisor::error::AppError;
use ib_advisor::recommendation::{AnswerSet, ScoringPolicy};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn default_scoring_policy() -> ScoringPolicy {
    ScoringPolicy {
        decision_margin: 0,
        tie_confidence: 50,
        borderline_threshold: 35,
    }
}

/// Parses an `ID=LABEL` pair such as `question4=B`.
pub(crate) fn parse_answer(raw: &str) -> Result<(String, String), String> {
    let (id, label) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=LABEL, got '{raw}'"))?;
    let (id, label) = (id.trim(), label.trim());
    if id.is_empty() || label.is_empty() {
        return Err(format!("expected ID=LABEL, got '{raw}'"));
    }
    Ok((id.to_string(), label.to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnswersDocument {
    Wrapped { answers: AnswerSet },
    Bare(AnswerSet),
}

/// Reads answers from a JSON file holding either `{"answers": {...}}` or the bare map.
pub(crate) fn load_answers_file(path: &Path) -> Result<AnswerSet, AppError> {
    let raw = std::fs::read_to_string(path)?;
    parse_answers_document(&raw)
        .map_err(|err| AppError::Answers(format!("{}: {err}", path.display())))
}

fn parse_answers_document(raw: &str) -> Result<AnswerSet, serde_json::Error> {
    let document: AnswersDocument = serde_json::from_str(raw)?;
    Ok(match document {
        AnswersDocument::Wrapped { answers } => answers,
        AnswersDocument::Bare(answers) => answers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_id_label_pairs() {
        assert_eq!(
            parse_answer(" question4 = B "),
            Ok(("question4".to_string(), "B".to_string()))
        );
        assert!(parse_answer("question4").is_err());
        assert!(parse_answer("=B").is_err());
        assert!(parse_answer("question4=").is_err());
    }

    #[test]
    fn answers_documents_may_be_wrapped_or_bare() {
        let wrapped = parse_answers_document(r#"{"answers":{"question1":"A"}}"#).expect("wrapped");
        let bare = parse_answers_document(r#"{"question1":"A"}"#).expect("bare");

        assert_eq!(wrapped, bare);
        assert_eq!(bare.get("question1"), Some("A"));
        assert!(parse_answers_document(r#"["question1"]"#).is_err());
    }

    #[test]
    fn default_policy_matches_library_default() {
        assert_eq!(default_scoring_policy(), ScoringPolicy::default());
    }
}
