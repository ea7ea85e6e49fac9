use crate::infra::{default_scoring_policy, load_answers_file, parse_answer};
use clap::{Args, ValueEnum};
use ib_advisor::error::AppError;
use ib_advisor::notification::render_recommendation_email;
use ib_advisor::recommendation::{
    AnswerSet, QuestionCatalog, RecommendationEngine, RecommendationResult, ScoreTally,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    /// The HTML body of the results email.
    Html,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// JSON file with answers, either `{"answers": {...}}` or a bare id-to-label map
    #[arg(long)]
    pub(crate) answers_file: Option<PathBuf>,
    /// Single answer as ID=LABEL; repeatable and applied after the file
    #[arg(long = "answer", value_parser = parse_answer)]
    pub(crate) answers: Vec<(String, String)>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        answers_file,
        answers: flags,
        format,
    } = args;

    let mut answers = match answers_file {
        Some(path) => load_answers_file(&path)?,
        None => AnswerSet::new(),
    };
    answers.extend(flags);

    let engine = RecommendationEngine::new(default_scoring_policy());
    let (result, tally) = engine.recommend_with_tally(&answers);

    print!("{}", render_recommendation(&result, &tally, &answers, format)?);
    Ok(())
}

pub(crate) fn render_recommendation(
    result: &RecommendationResult,
    tally: &ScoreTally,
    answers: &AnswerSet,
    format: OutputFormat,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => {
            let payload = json!({
                "recommendation": result,
                "scores": tally,
            });
            pretty_json(&payload)
        }
        OutputFormat::Html => Ok(render_recommendation_email(result).html),
        OutputFormat::Text => Ok(render_text(result, tally, answers)),
    }
}

fn pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    let mut rendered =
        serde_json::to_string_pretty(value).map_err(|err| AppError::Io(err.into()))?;
    rendered.push('\n');
    Ok(rendered)
}

fn render_text(result: &RecommendationResult, tally: &ScoreTally, answers: &AnswerSet) -> String {
    let mut out = String::new();
    out.push_str("IB Math recommendation\n");
    out.push_str(&format!("Answers scored: {}\n", answers.len()));
    out.push_str(&format!(
        "Scores: AA {} | AI {} | HL {} | SL {}\n",
        tally.aa, tally.ai, tally.hl, tally.sl
    ));
    out.push_str(&format!(
        "Course: {} ({}% confidence)\n",
        result.course.display_name(),
        result.course_confidence
    ));
    out.push_str(&format!(
        "Level: {} ({}% confidence)\n",
        result.level.display_name(),
        result.level_confidence
    ));
    out.push_str(&format!(
        "Overall confidence: {}%{}\n",
        result.overall_confidence,
        if result.details.borderline {
            " (borderline)"
        } else {
            ""
        }
    ));

    let details = &result.details;
    out.push_str(&format!("\nFocus: {}\n", details.focus));
    out.push_str(&format!("Style: {}\n", details.style));
    out.push_str(&format!("Advice: {}\n", details.advice));
    if !details.overrides.is_empty() {
        out.push_str("Overrides:\n");
        for message in &details.overrides {
            out.push_str(&format!("  - {message}\n"));
        }
    }
    out
}

pub(crate) fn run_questions() {
    print!("{}", render_questions(QuestionCatalog::standard()));
}

fn render_questions(catalog: &QuestionCatalog) -> String {
    let mut out = format!("{} questions\n", catalog.len());
    for question in catalog.questions() {
        out.push_str(&format!(
            "{:<12} {:<12} {}\n",
            question.id,
            question.category.label(),
            question.option_labels().collect::<Vec<_>>().join(" ")
        ));
    }
    out
}
