use super::domain::{Course, Level};

pub(crate) struct AdviceText {
    pub focus: &'static str,
    pub style: &'static str,
    pub advice: &'static str,
}

pub(crate) fn advice_for(course: Course, level: Level) -> AdviceText {
    let (focus, style) = match course {
        Course::Analysis => (
            "Strong emphasis on theoretical mathematics, abstract reasoning and proof.",
            "Learns best through abstract reasoning, formal proofs and rigorous algebraic argument.",
        ),
        Course::Applications => (
            "Emphasis on applying mathematics to real-world problems with data, modelling and technology.",
            "Learns best through data analysis, mathematical modelling, statistics and technology.",
        ),
        Course::Tie => (
            "Balanced between theoretical and applied mathematics; either course could suit you.",
            "A mix of theoretical understanding and practical application.",
        ),
    };

    let advice = match (course, level) {
        (Course::Analysis, Level::Higher) => {
            "Expect a rigorous, demanding course built on abstract principles. Strong problem-solving skills and a genuine interest in theory are essential."
        }
        (Course::Analysis, Level::Standard) => {
            "A solid grounding in theoretical mathematics for students who enjoy abstract ideas but want a lighter workload."
        }
        (Course::Applications, Level::Higher) => {
            "Applied mathematics in depth. Strong analytical skills and comfort with technology will carry you through a challenging, engaging course."
        }
        (Course::Applications, Level::Standard) => {
            "A practical course showing how mathematics is used across many fields, suited to students who want to see its relevance in context."
        }
        _ => {
            "Your answers do not point clearly to one option. Weigh your strengths and interests, and talk it through with your math teacher or counselor before choosing."
        }
    };

    AdviceText {
        focus,
        style,
        advice,
    }
}
