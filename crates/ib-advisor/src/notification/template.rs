use crate::recommendation::RecommendationResult;

pub const RECOMMENDATION_SUBJECT: &str = "Your IB Math Course Recommendation";

const BORDERLINE_NOTE: &str = "Your results sit on the borderline between levels or courses. Consider discussing them with your math teacher.";

const STYLESHEET: &str = "body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; }
.container { max-width: 600px; margin: 0 auto; padding: 20px; }
.header { background: #4F46E5; color: white; padding: 20px; text-align: center; border-radius: 8px 8px 0 0; }
.content { background: #f9fafb; padding: 20px; border-radius: 0 0 8px 8px; }
.result-box { background: white; padding: 15px; margin: 10px 0; border-radius: 5px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
.confidence { color: #4F46E5; font-weight: bold; }
.alert { background: #FEF2F2; color: #991B1B; padding: 10px; border-radius: 5px; margin-top: 10px; }";

/// Subject plus HTML and plain-text bodies for one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub fn render_recommendation_email(result: &RecommendationResult) -> RenderedEmail {
    RenderedEmail {
        subject: RECOMMENDATION_SUBJECT.to_string(),
        html: render_html(result),
        text: render_text(result),
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn render_html(result: &RecommendationResult) -> String {
    let details = &result.details;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<style>\n{STYLESHEET}\n</style>\n"));
    html.push_str("</head>\n<body>\n<div class=\"container\">\n");
    html.push_str("<div class=\"header\"><h1>Your IB Math Results</h1></div>\n");
    html.push_str("<div class=\"content\">\n");

    html.push_str("<div class=\"result-box\">\n<h2>Course Recommendation</h2>\n");
    html.push_str("<p>Based on your responses, we recommend:</p>\n");
    html.push_str(&format!(
        "<p><strong>Mathematics: {}</strong></p>\n",
        html_escape(result.course.display_name())
    ));
    html.push_str(&format!(
        "<p><strong>Level: {}</strong></p>\n",
        html_escape(result.level.display_name())
    ));
    html.push_str(&format!(
        "<p class=\"confidence\">Confidence Level: {}%</p>\n</div>\n",
        result.overall_confidence
    ));

    html.push_str("<div class=\"result-box\">\n<h2>Analysis Details</h2>\n");
    html.push_str(&format!(
        "<h3>Learning Focus</h3>\n<p>{}</p>\n",
        html_escape(&details.focus)
    ));
    html.push_str(&format!(
        "<h3>Learning Style</h3>\n<p>{}</p>\n",
        html_escape(&details.style)
    ));
    html.push_str(&format!(
        "<h3>Recommendations</h3>\n<p>{}</p>\n",
        html_escape(&details.advice)
    ));
    if !details.overrides.is_empty() {
        html.push_str("<h3>Special Considerations</h3>\n<ul>\n");
        for message in &details.overrides {
            html.push_str(&format!("<li>{}</li>\n", html_escape(message)));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</div>\n");

    if details.borderline {
        html.push_str(&format!(
            "<div class=\"alert\"><p><strong>Note:</strong> {BORDERLINE_NOTE}</p></div>\n"
        ));
    }

    html.push_str("</div>\n</div>\n</body>\n</html>\n");
    html
}

fn render_text(result: &RecommendationResult) -> String {
    let details = &result.details;
    let mut lines = vec![
        "Your IB Math Results".to_string(),
        String::new(),
        format!("Mathematics: {}", result.course.display_name()),
        format!("Level: {}", result.level.display_name()),
        format!("Confidence Level: {}%", result.overall_confidence),
        String::new(),
        format!("Learning Focus: {}", details.focus),
        format!("Learning Style: {}", details.style),
        format!("Recommendations: {}", details.advice),
    ];

    if !details.overrides.is_empty() {
        lines.push(String::new());
        lines.push("Special Considerations:".to_string());
        lines.extend(details.overrides.iter().map(|message| format!("- {message}")));
    }

    if details.borderline {
        lines.push(String::new());
        lines.push(format!("Note: {BORDERLINE_NOTE}"));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::{Course, Level, RecommendationDetails};

    fn result(borderline: bool, overrides: Vec<String>) -> RecommendationResult {
        RecommendationResult {
            course: Course::Analysis,
            level: Level::Higher,
            course_confidence: 70,
            level_confidence: 60,
            overall_confidence: 65,
            details: RecommendationDetails {
                focus: "Proofs & <abstract> reasoning".to_string(),
                style: "Rigorous".to_string(),
                advice: "Talk to your \"teacher\"".to_string(),
                overrides,
                borderline,
            },
        }
    }

    #[test]
    fn html_names_course_level_and_confidence() {
        let email = render_recommendation_email(&result(false, Vec::new()));

        assert_eq!(email.subject, RECOMMENDATION_SUBJECT);
        assert!(email.html.contains("Mathematics: Analysis &amp; Approaches"));
        assert!(email.html.contains("Level: Higher Level"));
        assert!(email.html.contains("Confidence Level: 65%"));
        assert!(!email.html.contains("class=\"alert\""));
        assert!(!email.html.contains("Special Considerations"));
    }

    #[test]
    fn html_escapes_interpolated_text() {
        let email = render_recommendation_email(&result(false, vec!["<script>".to_string()]));

        assert!(email.html.contains("Proofs &amp; &lt;abstract&gt; reasoning"));
        assert!(email.html.contains("Talk to your &quot;teacher&quot;"));
        assert!(email.html.contains("<li>&lt;script&gt;</li>"));
        assert!(!email.html.contains("<script>"));
    }

    #[test]
    fn borderline_results_carry_a_note() {
        let email = render_recommendation_email(&result(true, Vec::new()));

        assert!(email.html.contains("class=\"alert\""));
        assert!(email.text.contains("Note: Your results sit on the borderline"));
    }

    #[test]
    fn ties_render_both_options() {
        let mut tied = result(true, Vec::new());
        tied.course = Course::Tie;
        tied.level = Level::Tie;

        let email = render_recommendation_email(&tied);

        assert!(email.html.contains("AA or AI (Tie)"));
        assert!(email.html.contains("HL or SL (Tie)"));
        assert!(email.text.contains("Mathematics: AA or AI (Tie)"));
    }

    #[test]
    fn text_body_lists_overrides() {
        let email = render_recommendation_email(&result(
            false,
            vec!["University entry requirements call for HL: level set to HL".to_string()],
        ));

        assert!(email
            .text
            .contains("- University entry requirements call for HL: level set to HL"));
        assert!(email.text.contains("Learning Focus: Proofs & <abstract> reasoning"));
    }
}
