use std::collections::HashMap;
use std::sync::OnceLock;

use super::domain::{QuestionCategory, ScoreEffect};

/// One questionnaire item and the push each of its options gives the axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionConfig {
    pub id: &'static str,
    pub category: QuestionCategory,
    pub options: &'static [(&'static str, ScoreEffect)],
}

impl QuestionConfig {
    pub fn effect(&self, option: &str) -> Option<&ScoreEffect> {
        self.options
            .iter()
            .find(|(label, _)| *label == option)
            .map(|(_, effect)| effect)
    }

    pub fn option_labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.options.iter().map(|(label, _)| *label)
    }
}

/// Read-only question table with an id index built once at construction.
#[derive(Debug)]
pub struct QuestionCatalog {
    questions: &'static [QuestionConfig],
    index: HashMap<&'static str, usize>,
}

impl QuestionCatalog {
    /// The shipped questionnaire, initialized on first use and shared afterwards.
    pub fn standard() -> &'static QuestionCatalog {
        static CATALOG: OnceLock<QuestionCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| QuestionCatalog::from_questions(STANDARD_QUESTIONS))
    }

    /// Builds a catalog over `questions`. A repeated id resolves to its first entry.
    pub fn from_questions(questions: &'static [QuestionConfig]) -> Self {
        let mut index = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            index.entry(question.id).or_insert(position);
        }

        Self { questions, index }
    }

    pub fn get(&self, question_id: &str) -> Option<&QuestionConfig> {
        self.index
            .get(question_id)
            .map(|position| &self.questions[*position])
    }

    pub fn effect_for(&self, question_id: &str, option: &str) -> Option<&ScoreEffect> {
        self.get(question_id)
            .and_then(|question| question.effect(option))
    }

    pub fn questions(&self) -> &[QuestionConfig] {
        self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

const CORRECT_ANSWER: ScoreEffect = ScoreEffect::new(1, 1, 1, 1);

// Option E is "no preference" on every preference question.
static STANDARD_QUESTIONS: &[QuestionConfig] = &[
    QuestionConfig {
        id: "question1",
        category: QuestionCategory::Career,
        options: &[
            ("A", ScoreEffect::new(3, 0, 2, 0)),
            ("B", ScoreEffect::new(-1, -1, -2, 2)),
            ("C", ScoreEffect::new(0, 3, 1, 1)),
            ("D", ScoreEffect::new(-2, -1, -3, 3)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question2",
        category: QuestionCategory::Career,
        options: &[
            ("A", ScoreEffect::new(3, 0, 2, 0)),
            ("B", ScoreEffect::new(-1, -1, -1, 1)),
            ("C", ScoreEffect::new(0, 3, 2, 0)),
            ("D", ScoreEffect::new(-2, -2, -2, 2)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question3",
        category: QuestionCategory::Career,
        options: &[
            ("A", ScoreEffect::new(2, -2, 2, -1)),
            ("B", ScoreEffect::new(0, 0, 0, 1)),
            ("C", ScoreEffect::new(-2, 3, 1, 1)),
            ("D", ScoreEffect::new(-1, -1, -2, 2)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question4",
        category: QuestionCategory::Career,
        options: &[
            ("A", ScoreEffect::new(2, -1, 3, -2)),
            ("B", ScoreEffect::new(1, 1, 2, 0)),
            ("C", ScoreEffect::new(0, 0, -1, 1)),
            ("D", ScoreEffect::new(-1, -1, -2, 2)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question5",
        category: QuestionCategory::Career,
        options: &[
            ("A", ScoreEffect::new(3, -1, 2, -1)),
            ("B", ScoreEffect::new(1, -1, 0, 1)),
            ("C", ScoreEffect::new(-1, 3, 1, 1)),
            ("D", ScoreEffect::new(-2, -1, -2, 2)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question6",
        category: QuestionCategory::Interest,
        options: &[
            ("A", ScoreEffect::new(3, -1, 2, -1)),
            ("B", ScoreEffect::new(-1, 3, 1, 1)),
            ("C", ScoreEffect::new(1, 1, 0, 1)),
            ("D", ScoreEffect::new(-2, -2, -1, 2)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question7",
        category: QuestionCategory::Interest,
        options: &[
            ("A", ScoreEffect::new(3, -1, 2, -1)),
            ("B", ScoreEffect::new(-1, 3, 1, 1)),
            ("C", ScoreEffect::new(1, 1, 0, 1)),
            ("D", ScoreEffect::new(-1, -1, -1, 1)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question8",
        category: QuestionCategory::Interest,
        options: &[
            ("A", ScoreEffect::new(3, -1, 2, -1)),
            ("B", ScoreEffect::new(-1, 3, 1, 1)),
            ("C", ScoreEffect::new(0, 0, 0, 0)),
            ("D", ScoreEffect::new(-1, -1, -1, 2)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question9",
        category: QuestionCategory::Interest,
        options: &[
            ("A", ScoreEffect::new(3, -1, 2, -1)),
            ("B", ScoreEffect::new(-1, 3, 1, 1)),
            ("C", ScoreEffect::new(1, 1, 0, 1)),
            ("D", ScoreEffect::new(-2, -2, -1, 2)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question10",
        category: QuestionCategory::Interest,
        options: &[
            ("A", ScoreEffect::new(3, -1, 2, -1)),
            ("B", ScoreEffect::new(-1, 3, 1, 1)),
            ("C", ScoreEffect::new(1, 1, 0, 1)),
            ("D", ScoreEffect::new(-1, -1, -1, 1)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question11",
        category: QuestionCategory::Skill,
        options: &[
            ("A", ScoreEffect::new(2, 0, 3, -2)),
            ("B", ScoreEffect::new(1, 1, 1, 0)),
            ("C", ScoreEffect::new(-1, -1, -1, 2)),
            ("D", ScoreEffect::new(-2, -2, -3, 3)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question12",
        category: QuestionCategory::Skill,
        options: &[
            ("A", ScoreEffect::new(1, 0, 3, -2)),
            ("B", ScoreEffect::new(0, 1, 1, 0)),
            ("C", ScoreEffect::new(-1, -1, -2, 2)),
            ("D", ScoreEffect::new(-2, -1, -3, 3)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question13",
        category: QuestionCategory::Skill,
        options: &[
            ("A", ScoreEffect::new(1, -1, 1, 0)),
            ("B", ScoreEffect::new(-1, 2, 2, -1)),
            ("C", ScoreEffect::new(0, 1, 0, 1)),
            ("D", ScoreEffect::new(1, 1, 0, 1)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question14",
        category: QuestionCategory::Skill,
        options: &[
            ("A", ScoreEffect::new(2, -2, 2, -1)),
            ("B", ScoreEffect::new(-2, 3, 1, 1)),
            ("C", ScoreEffect::new(1, -1, 0, 1)),
            ("D", ScoreEffect::new(-1, -2, -2, 3)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question15",
        category: QuestionCategory::Skill,
        options: &[
            ("A", ScoreEffect::new(2, -1, 3, -2)),
            ("B", ScoreEffect::new(-1, 2, 1, 0)),
            ("C", ScoreEffect::new(1, 1, 0, 1)),
            ("D", ScoreEffect::new(-2, -2, -2, 2)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question16",
        category: QuestionCategory::Learning,
        options: &[
            ("A", ScoreEffect::new(3, -1, 2, -1)),
            ("B", ScoreEffect::new(-1, 3, 1, 1)),
            ("C", ScoreEffect::new(1, 1, 0, 1)),
            ("D", ScoreEffect::new(-1, -1, -1, 1)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question17",
        category: QuestionCategory::Learning,
        options: &[
            ("A", ScoreEffect::new(3, -1, 2, -1)),
            ("B", ScoreEffect::new(-1, 3, 1, 1)),
            ("C", ScoreEffect::new(-2, -2, -1, 2)),
            ("D", ScoreEffect::new(-1, -1, -2, 2)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question18",
        category: QuestionCategory::Learning,
        options: &[
            ("A", ScoreEffect::new(1, -1, 0, 1)),
            ("B", ScoreEffect::new(-1, 3, 2, -1)),
            ("C", ScoreEffect::new(0, 1, 0, 1)),
            ("D", ScoreEffect::new(-1, -1, -1, 2)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question19",
        category: QuestionCategory::Learning,
        options: &[
            ("A", ScoreEffect::new(3, -1, 2, -1)),
            ("B", ScoreEffect::new(-1, 3, 1, 1)),
            ("C", ScoreEffect::new(0, 0, 0, 0)),
            ("D", ScoreEffect::new(-2, -2, -2, 2)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question20",
        category: QuestionCategory::Learning,
        options: &[
            ("A", ScoreEffect::new(3, -1, 2, -1)),
            ("B", ScoreEffect::new(-1, 3, 1, 1)),
            ("C", ScoreEffect::new(1, 1, 0, 1)),
            ("D", ScoreEffect::new(-2, -2, -2, 2)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question21",
        category: QuestionCategory::Future,
        options: &[
            ("A", ScoreEffect::new(2, 0, 3, -2)),
            ("B", ScoreEffect::new(1, 1, 2, 0)),
            ("C", ScoreEffect::new(-1, -1, -2, 2)),
            ("D", ScoreEffect::new(-2, -1, -3, 3)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question22",
        category: QuestionCategory::Future,
        options: &[
            ("A", ScoreEffect::new(3, -1, 2, -1)),
            ("B", ScoreEffect::new(-1, 3, 1, 1)),
            ("C", ScoreEffect::new(-2, -1, -1, 2)),
            ("D", ScoreEffect::new(0, 0, 0, 1)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question23",
        category: QuestionCategory::Future,
        options: &[
            ("A", ScoreEffect::new(3, -2, 3, -2)),
            ("B", ScoreEffect::new(1, 1, 2, 0)),
            ("C", ScoreEffect::new(-1, -1, -1, 2)),
            ("D", ScoreEffect::new(0, 0, -2, 2)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question24",
        category: QuestionCategory::Future,
        options: &[
            ("A", ScoreEffect::new(1, 1, 1, 0)),
            ("B", ScoreEffect::new(0, 0, 1, 0)),
            ("C", ScoreEffect::new(-1, -1, -1, 1)),
            ("D", ScoreEffect::new(0, 0, 0, 1)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    QuestionConfig {
        id: "question25",
        category: QuestionCategory::Future,
        options: &[
            ("A", ScoreEffect::new(1, -1, 3, -2)),
            ("B", ScoreEffect::new(0, 0, 1, 0)),
            ("C", ScoreEffect::new(0, 0, 0, 0)),
            ("D", ScoreEffect::new(-1, -1, -2, 2)),
            ("E", ScoreEffect::new(0, 0, 0, 0)),
        ],
    },
    // Sample problems: only the correct option is listed.
    QuestionConfig {
        id: "question31",
        category: QuestionCategory::Proficiency,
        options: &[("A", CORRECT_ANSWER)],
    },
    QuestionConfig {
        id: "question32",
        category: QuestionCategory::Proficiency,
        options: &[("A", CORRECT_ANSWER)],
    },
    QuestionConfig {
        id: "question33",
        category: QuestionCategory::Proficiency,
        options: &[("A", CORRECT_ANSWER)],
    },
    QuestionConfig {
        id: "question34",
        category: QuestionCategory::Proficiency,
        options: &[("A", CORRECT_ANSWER)],
    },
    // Basic arithmetic checks.
    QuestionConfig {
        id: "question35",
        category: QuestionCategory::Proficiency,
        options: &[("B", CORRECT_ANSWER)],
    },
    QuestionConfig {
        id: "question36",
        category: QuestionCategory::Proficiency,
        options: &[("B", CORRECT_ANSWER)],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_catalog_lists_every_question_once() {
        let catalog = QuestionCatalog::standard();
        assert_eq!(catalog.len(), 31);

        let ids: HashSet<_> = catalog.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn preference_questions_offer_five_options_with_neutral_e() {
        let catalog = QuestionCatalog::standard();
        let preference: Vec<_> = catalog
            .questions()
            .iter()
            .filter(|q| q.category != QuestionCategory::Proficiency)
            .collect();
        assert_eq!(preference.len(), 25);

        for question in preference {
            let labels: Vec<_> = question.option_labels().collect();
            assert_eq!(labels, ["A", "B", "C", "D", "E"], "{}", question.id);
            assert!(question.effect("E").expect("E present").is_neutral());
        }
    }

    #[test]
    fn categories_group_five_questions_each() {
        let catalog = QuestionCatalog::standard();
        for category in [
            QuestionCategory::Career,
            QuestionCategory::Interest,
            QuestionCategory::Skill,
            QuestionCategory::Learning,
            QuestionCategory::Future,
        ] {
            let count = catalog
                .questions()
                .iter()
                .filter(|q| q.category == category)
                .count();
            assert_eq!(count, 5, "{}", category.label());
        }
    }

    #[test]
    fn lookup_resolves_known_effects() {
        let catalog = QuestionCatalog::standard();
        assert_eq!(
            catalog.effect_for("question1", "A"),
            Some(&ScoreEffect::new(3, 0, 2, 0))
        );
        assert_eq!(
            catalog.effect_for("question35", "B"),
            Some(&CORRECT_ANSWER)
        );
        assert!(catalog.effect_for("question35", "A").is_none());
        assert!(catalog.effect_for("question1", "Z").is_none());
        assert!(catalog.effect_for("question99", "A").is_none());
    }

    #[test]
    fn repeated_ids_resolve_to_first_entry() {
        static DUPLICATED: &[QuestionConfig] = &[
            QuestionConfig {
                id: "q",
                category: QuestionCategory::Skill,
                options: &[("A", ScoreEffect::new(1, 0, 0, 0))],
            },
            QuestionConfig {
                id: "q",
                category: QuestionCategory::Skill,
                options: &[("A", ScoreEffect::new(0, 1, 0, 0))],
            },
        ];

        let catalog = QuestionCatalog::from_questions(DUPLICATED);
        assert_eq!(
            catalog.effect_for("q", "A"),
            Some(&ScoreEffect::new(1, 0, 0, 0))
        );
    }
}
