//! Rank extraction from free-text review verdicts.
//!
//! Reviewers are asked for a strict `FINAL RANKING: A > B > C` line, but
//! models drift: numbered lists, prose ordinals, bare sequences. The
//! extractor is an ordered list of independent matchers, each returning
//! either an order or nothing; the first matcher that finds at least one
//! valid label wins and later matchers are never consulted.
//!
//! No match is a valid outcome: the ranking then simply carries no
//! votes. Extraction is pure and deterministic.

use super::label::Label;
use regex::Regex;
use std::sync::LazyLock;

type Matcher = fn(&str) -> Vec<Label>;

/// Matchers in strict priority order.
const MATCHERS: [Matcher; 6] = [
    declared_ranking,
    numbered_list,
    ordinal_keywords,
    solution_mentions,
    bare_sequence,
    context_scan,
];

/// Parse one reviewer's verdict into an ordered label sequence.
pub fn extract_ranking(text: &str) -> Vec<Label> {
    for matcher in MATCHERS {
        let order = matcher(text);
        if !order.is_empty() {
            return order;
        }
    }
    Vec::new()
}

fn parse_labels<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<Label> {
    tokens
        .filter_map(|token| {
            let mut chars = token.chars();
            let first = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            Label::parse_char(first).ok()
        })
        .collect()
}

/// Rule 1: an explicit `FINAL RANKING:` declaration followed by a label
/// sequence separated by `>`, `→`, `-`, commas, or whitespace.
fn declared_ranking(text: &str) -> Vec<Label> {
    static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)FINAL\s*RANKING[:\s]*([A-E][\s>\-→,A-E]*)").unwrap()
    });
    static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[>\-→,\s]+").unwrap());

    let Some(captures) = DECLARATION.captures(text) else {
        return Vec::new();
    };
    parse_labels(SEPARATOR.split(&captures[1]))
}

/// Rule 2: a numbered list (`1. A`, `2) B`, `3: C`), markdown bold
/// tolerated around the label.
fn numbered_list(text: &str) -> Vec<Label> {
    static LINE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)[1-5][.):]\s*\*{0,2}([A-E])\b").unwrap());

    LINE.captures_iter(text)
        .filter_map(|c| label_from_capture(&c[1]))
        .collect()
}

/// Rule 3: ordinal keywords each immediately followed by a label.
fn ordinal_keywords(text: &str) -> Vec<Label> {
    static ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)(?:best|first|1st|second|2nd|third|3rd|worst|last)[:\s]+\*{0,2}([A-E])\b")
            .unwrap()
    });

    ORDINAL
        .captures_iter(text)
        .filter_map(|c| label_from_capture(&c[1]))
        .collect()
}

/// Rule 4: `Solution X` mentions in document order.
fn solution_mentions(text: &str) -> Vec<Label> {
    static SOLUTION: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)\bsolution\s+([A-E])\b").unwrap());

    SOLUTION
        .captures_iter(text)
        .filter_map(|c| label_from_capture(&c[1]))
        .collect()
}

/// Rule 5: the first two-or-three-label delimiter-separated sequence
/// appearing anywhere in the text.
fn bare_sequence(text: &str) -> Vec<Label> {
    static SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)\b([A-E])\s*[>\-→,]\s*([A-E])(?:\s*[>\-→,]\s*([A-E]))?\b").unwrap()
    });

    let Some(captures) = SEQUENCE.captures(text) else {
        return Vec::new();
    };
    captures
        .iter()
        .skip(1)
        .flatten()
        .filter_map(|m| label_from_capture(m.as_str()))
        .collect()
}

/// Rule 6, last resort: when the text talks about ranking at all, collect
/// standalone uppercase label tokens, deduplicated in first-seen order.
fn context_scan(text: &str) -> Vec<Label> {
    static STANDALONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b([A-E])\b").unwrap());

    let lowered = text.to_lowercase();
    if !["rank", "best", "order"]
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        return Vec::new();
    }

    let mut seen = Vec::new();
    for captures in STANDALONE.captures_iter(text) {
        if let Some(label) = label_from_capture(&captures[1])
            && !seen.contains(&label)
        {
            seen.push(label);
        }
    }
    seen
}

fn label_from_capture(capture: &str) -> Option<Label> {
    capture
        .chars()
        .next()
        .and_then(|c| Label::parse_char(c).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(s: &str) -> Vec<Label> {
        s.chars().map(|c| Label::parse_char(c).unwrap()).collect()
    }

    #[test]
    fn declared_ranking_with_arrows() {
        assert_eq!(extract_ranking("FINAL RANKING: A > C > B"), labels("ACB"));
        assert_eq!(extract_ranking("final ranking: b → a → c"), labels("BAC"));
        assert_eq!(extract_ranking("FINAL RANKING: C, A, B"), labels("CAB"));
    }

    #[test]
    fn declared_ranking_takes_priority_over_later_mentions() {
        let text = "Solution C was weak.\nFINAL RANKING: A > B > C\nOverall solution A wins.";
        assert_eq!(extract_ranking(text), labels("ABC"));
    }

    #[test]
    fn numbered_list_forms() {
        assert_eq!(extract_ranking("1. B 2. A 3. C"), labels("BAC"));
        assert_eq!(extract_ranking("1) **C**\n2) A\n3) B"), labels("CAB"));
        assert_eq!(extract_ranking("1: a\n2: c"), labels("AC"));
    }

    #[test]
    fn ordinal_keywords_form() {
        assert_eq!(
            extract_ranking("Best: A. Second: B. Worst: C."),
            labels("ABC")
        );
        assert_eq!(extract_ranking("Best: **B**. Worst: A."), labels("BA"));
    }

    #[test]
    fn solution_mentions_in_document_order() {
        let text = "Solution B handles the edge cases; Solution A misses one.";
        assert_eq!(extract_ranking(text), labels("BA"));
    }

    #[test]
    fn bare_sequence_anywhere() {
        assert_eq!(extract_ranking("I'd go with B > C > A overall."), labels("BCA"));
        assert_eq!(extract_ranking("Something like C, A I think"), labels("CA"));
    }

    #[test]
    fn context_scan_dedupes_preserving_order() {
        let text = "My ranking places B over A, with B clearly stronger and C last.";
        // Rule 5 fires first on "B over A"? No delimiter between B and A,
        // so it falls through to the context scan.
        assert_eq!(extract_ranking(text), labels("BAC"));
    }

    #[test]
    fn context_scan_needs_ranking_vocabulary() {
        assert_eq!(extract_ranking("A and B met C at noon."), vec![]);
    }

    #[test]
    fn no_structure_yields_empty() {
        assert_eq!(extract_ranking("The weather is nice today."), vec![]);
        assert_eq!(extract_ranking(""), vec![]);
    }

    #[test]
    fn extraction_is_deterministic() {
        let text = "FINAL RANKING: C > B > A";
        assert_eq!(extract_ranking(text), extract_ranking(text));
    }

    #[test]
    fn invalid_letters_end_the_declared_sequence() {
        // The declaration capture stops at the first non-label letter.
        assert_eq!(extract_ranking("FINAL RANKING: A > F > B"), labels("A"));
    }
}
