//! Console output formatting for completed requests.

use colored::Colorize;
use council_domain::RequestOutcome;

pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Full report: answer, critique, and the mind-map reference when
    /// one was produced.
    pub fn format(outcome: &RequestOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{}\n\n", "=== Final Answer ===".bold().cyan()));
        output.push_str(&outcome.answer);
        output.push('\n');

        if !outcome.critique.is_empty() {
            output.push_str(&format!("\n{}\n\n", "=== Critique ===".bold().cyan()));
            output.push_str(&outcome.critique);
            output.push('\n');
        }

        if let Some(mindmap) = &outcome.mindmap {
            output.push_str(&format!("\n{} {}\n", "Concept map:".bold(), mindmap));
        }

        output
    }

    /// Just the synthesized answer.
    pub fn format_answer_only(outcome: &RequestOutcome) -> String {
        outcome.answer.clone()
    }

    /// The whole outcome as pretty JSON.
    pub fn format_json(outcome: &RequestOutcome) -> String {
        serde_json::to_string_pretty(outcome)
            .unwrap_or_else(|e| format!(r#"{{"success":false,"error":"{e}"}}"#))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_format_includes_sections() {
        let outcome = RequestOutcome::completed("The answer.", "APPROVED. Fine.")
            .with_mindmap(Some("maps/x.png".to_string()));
        let text = ConsoleFormatter::format(&outcome);
        assert!(text.contains("Final Answer"));
        assert!(text.contains("The answer."));
        assert!(text.contains("APPROVED. Fine."));
        assert!(text.contains("maps/x.png"));
    }

    #[test]
    fn exam_outcome_skips_critique_section() {
        let outcome = RequestOutcome::exam("**Question 1**");
        let text = ConsoleFormatter::format(&outcome);
        assert!(!text.contains("Critique"));
    }

    #[test]
    fn json_format_round_trips() {
        let outcome = RequestOutcome::completed("a", "c");
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&outcome)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["answer"], "a");
    }
}
