//! Extraction of a score and feedback text from the model's free-form reply.
//!
//! The model is asked for a `Score: ` line and a `Feedback: ` line, but its
//! output format is not guaranteed. Each label is matched literally, including
//! its single trailing space. Nothing here fails: a missing score is
//! `None`, missing feedback becomes [`NO_FEEDBACK`].

use regex::Regex;
use std::sync::OnceLock;

pub const NO_FEEDBACK: &str = "No feedback provided.";
pub const MAX_SCORE: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFeedback {
    pub score: Option<u8>,
    pub feedback: String,
}

/// A labelled section of model output. Matches from the first occurrence of
/// the label to the end of the text, line breaks and later labels included.
#[derive(Debug)]
pub struct ExtractionRule {
    pub label: &'static str,
    pattern: Regex,
}

impl ExtractionRule {
    pub fn new(label: &'static str) -> Self {
        let pattern = Regex::new(&format!(r"(?s){}(.*)", regex::escape(label)))
            .expect("escaped label is a valid pattern");
        Self { label, pattern }
    }

    /// The trimmed text after the label, or `None` if the label is absent or
    /// only whitespace follows it to the end of the text.
    pub fn extract<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let captured = self.pattern.captures(raw)?.get(1)?.as_str().trim();
        (!captured.is_empty()).then_some(captured)
    }
}

/// Feedback labels in priority order.
pub fn feedback_rules() -> &'static [ExtractionRule] {
    static RULES: OnceLock<Vec<ExtractionRule>> = OnceLock::new();
    RULES.get_or_init(|| vec![ExtractionRule::new("Feedback: "), ExtractionRule::new("Observations: ")])
}

fn score_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"Score: ([0-9]+)").expect("valid score pattern"))
}

pub fn parse(raw: &str) -> ParsedFeedback {
    ParsedFeedback {
        score: extract_score(raw),
        feedback: extract_feedback(raw, feedback_rules()),
    }
}

/// First `Score: ` followed by ASCII digits. Values above [`MAX_SCORE`] are
/// dropped rather than clamped.
pub fn extract_score(raw: &str) -> Option<u8> {
    let digits = score_pattern().captures(raw)?.get(1)?.as_str();
    digits.parse::<u8>().ok().filter(|score| *score <= MAX_SCORE)
}

pub fn extract_feedback(raw: &str, rules: &[ExtractionRule]) -> String {
    rules
        .iter()
        .find_map(|rule| rule.extract(raw))
        .unwrap_or(NO_FEEDBACK)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_score_and_feedback() {
        let parsed = parse("Score: 7\nFeedback: good job");
        assert_eq!(
            parsed,
            ParsedFeedback {
                score: Some(7),
                feedback: "good job".to_string()
            }
        );
    }

    #[test]
    fn feedback_keeps_embedded_line_breaks() {
        let raw = "Score: 6\nFeedback: Solid start.\n\n- mention hoisting\n- give an example\n";
        assert_eq!(
            parse(raw).feedback,
            "Solid start.\n\n- mention hoisting\n- give an example"
        );
    }

    #[test]
    fn falls_back_to_observations() {
        let parsed = parse("Score: 4\nObservations:  Too vague about ownership.  ");
        assert_eq!(parsed.score, Some(4));
        assert_eq!(parsed.feedback, "Too vague about ownership.");
    }

    #[test]
    fn feedback_label_wins_over_observations() {
        let parsed = parse("Observations: first\nFeedback: second");
        assert_eq!(parsed.feedback, "second");
    }

    #[test]
    fn placeholder_when_no_label_but_score_still_read() {
        let parsed = parse("Score: 9\nGreat answer overall.");
        assert_eq!(parsed.score, Some(9));
        assert_eq!(parsed.feedback, NO_FEEDBACK);
    }

    #[test]
    fn feedback_section_runs_to_end_of_text() {
        let parsed = parse("Feedback:   \nObservations: covered the basics");
        assert_eq!(parsed.feedback, "Observations: covered the basics");
    }

    #[test]
    fn whitespace_only_feedback_falls_through() {
        assert_eq!(
            parse("Observations: covered the basics\nFeedback:   \n").feedback,
            "covered the basics\nFeedback:"
        );
        assert_eq!(parse("Score: 3\nFeedback: \n\t").feedback, NO_FEEDBACK);
    }

    #[test]
    fn missing_score_is_none() {
        assert_eq!(parse("Feedback: nice").score, None);
        assert_eq!(parse("Score: N/A\nFeedback: nice").score, None);
        assert_eq!(parse("").score, None);
    }

    #[test]
    fn out_of_range_scores_are_dropped() {
        assert_eq!(extract_score("Score: 11"), None);
        assert_eq!(extract_score("Score: 99999999999999999999"), None);
        assert_eq!(extract_score("Score: 10"), Some(10));
        assert_eq!(extract_score("Score: 0"), Some(0));
    }

    #[test]
    fn score_label_is_matched_literally() {
        assert_eq!(extract_score("Score: 8/10"), Some(8));
        assert_eq!(extract_score("Score:8"), None);
        assert_eq!(extract_score("Score:  8"), None);
        assert_eq!(extract_score("Score: 5\nRevised Score: 6"), Some(5));
    }

    #[test]
    fn score_digits_are_ascii_only() {
        assert_eq!(extract_score("Score: 7\u{0663}"), Some(7));
        assert_eq!(extract_score("Score: \u{0663}"), None);
    }

    #[test]
    fn parse_is_idempotent() {
        let raw = "Some preamble\nScore: 2\nFeedback: Needs work on edge cases.";
        assert_eq!(parse(raw), parse(raw));
    }

    #[test]
    fn custom_rule_list_is_respected() {
        let rules = [ExtractionRule::new("Verdict:")];
        assert_eq!(extract_feedback("Verdict: ok\nFeedback: ignored", &rules), "ok\nFeedback: ignored");
        assert_eq!(extract_feedback("Feedback: only this", &rules), NO_FEEDBACK);
    }

    #[test]
    fn default_rules_are_feedback_then_observations() {
        let labels: Vec<&str> = feedback_rules().iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Feedback: ", "Observations: "]);
    }
}
