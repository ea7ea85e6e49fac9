use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};

/// IB Mathematics course track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Course {
    /// Analysis & Approaches.
    #[serde(rename = "AA")]
    Analysis,
    /// Applications & Interpretation.
    #[serde(rename = "AI")]
    Applications,
    #[serde(rename = "TIE", alias = "Tie")]
    Tie,
}

impl Course {
    pub const fn code(self) -> &'static str {
        match self {
            Course::Analysis => "AA",
            Course::Applications => "AI",
            Course::Tie => "TIE",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Course::Analysis => "Analysis & Approaches",
            Course::Applications => "Applications & Interpretation",
            Course::Tie => "AA or AI (Tie)",
        }
    }
}

/// Depth tier offered within either course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "HL")]
    Higher,
    #[serde(rename = "SL")]
    Standard,
    #[serde(rename = "TIE", alias = "Tie")]
    Tie,
}

impl Level {
    pub const fn code(self) -> &'static str {
        match self {
            Level::Higher => "HL",
            Level::Standard => "SL",
            Level::Tie => "TIE",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Level::Higher => "Higher Level",
            Level::Standard => "Standard Level",
            Level::Tie => "HL or SL (Tie)",
        }
    }
}

/// Grouping shown alongside each question. Never consulted while scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Career,
    Interest,
    Skill,
    Learning,
    Future,
    Proficiency,
}

impl QuestionCategory {
    pub const fn label(self) -> &'static str {
        match self {
            QuestionCategory::Career => "career",
            QuestionCategory::Interest => "interest",
            QuestionCategory::Skill => "skill",
            QuestionCategory::Learning => "learning",
            QuestionCategory::Future => "future",
            QuestionCategory::Proficiency => "proficiency",
        }
    }
}

/// Signed push an answer option gives each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreEffect {
    #[serde(default)]
    pub aa: i8,
    #[serde(default)]
    pub ai: i8,
    #[serde(default)]
    pub hl: i8,
    #[serde(default)]
    pub sl: i8,
}

impl ScoreEffect {
    pub const fn new(aa: i8, ai: i8, hl: i8, sl: i8) -> Self {
        Self { aa, ai, hl, sl }
    }

    pub const fn is_neutral(&self) -> bool {
        self.aa == 0 && self.ai == 0 && self.hl == 0 && self.sl == 0
    }
}

/// Running axis totals for one questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreTally {
    pub aa: i32,
    pub ai: i32,
    pub hl: i32,
    pub sl: i32,
}

impl ScoreTally {
    pub const fn new(aa: i32, ai: i32, hl: i32, sl: i32) -> Self {
        Self { aa, ai, hl, sl }
    }

    pub fn apply(&mut self, effect: &ScoreEffect) {
        self.aa += i32::from(effect.aa);
        self.ai += i32::from(effect.ai);
        self.hl += i32::from(effect.hl);
        self.sl += i32::from(effect.sl);
    }
}

/// Question id to selected option label for one respondent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_id: impl Into<String>, option: impl Into<String>) {
        self.0.insert(question_id.into(), option.into());
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(id, option)| (id.as_str(), option.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, option)| (id.into(), option.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for AnswerSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (id, option) in iter {
            self.insert(id, option);
        }
    }
}

/// Course and level recommendation with the reasoning shown to the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub course: Course,
    pub level: Level,
    #[serde(deserialize_with = "deserialize_confidence")]
    pub course_confidence: u8,
    #[serde(deserialize_with = "deserialize_confidence")]
    pub level_confidence: u8,
    #[serde(deserialize_with = "deserialize_confidence")]
    pub overall_confidence: u8,
    pub details: RecommendationDetails,
}

/// Reads a percentage in `0..=100`. Values strictly between 0 and 1 are fractions
/// from older clients and are scaled to percent. Rounds half up.
fn deserialize_confidence<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(de::Error::custom(format_args!(
            "confidence {value} is outside 0-100"
        )));
    }

    let percent = if value > 0.0 && value < 1.0 {
        value * 100.0
    } else {
        value
    };
    Ok((percent + 0.5).floor() as u8)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationDetails {
    pub focus: String,
    pub style: String,
    pub advice: String,
    #[serde(default)]
    pub overrides: Vec<String>,
    #[serde(default)]
    pub borderline: bool,
}
