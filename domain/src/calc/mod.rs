//! Numeric-expression markup processing.
//!
//! Drafting agents are instructed to wrap every numeric computation in
//! `CALCULATE(...)` instead of doing mental arithmetic. After a draft
//! comes back, [`substitute_markup`] rewrites each marked span with the
//! computed value. A span that fails to evaluate becomes an inline
//! `[calc error: ...]` marker; one bad expression never invalidates the
//! draft around it.

pub mod eval;

pub use eval::{CalcError, evaluate, format_value};

use regex::Regex;
use std::sync::LazyLock;

static MARKUP_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)CALCULATE\(").unwrap());

/// Replace every `CALCULATE(expression)` span in `text` with its value.
///
/// The expression extends to the parenthesis matching the opening one,
/// so nested calls like `CALCULATE(tan(radians(30)))` resolve as a
/// whole. An unterminated span is left verbatim.
pub fn substitute_markup(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(open) = MARKUP_OPEN.find_at(text, cursor) {
        output.push_str(&text[cursor..open.start()]);
        let body_start = open.end();
        match balanced_span(&text[body_start..]) {
            Some(body_len) => {
                let expression = &text[body_start..body_start + body_len];
                match evaluate(expression) {
                    Ok(value) => output.push_str(&format_value(value)),
                    Err(error) => {
                        output.push_str(&format!("[calc error: {error}]"));
                    }
                }
                cursor = body_start + body_len + ')'.len_utf8();
            }
            None => {
                output.push_str(&text[open.start()..]);
                return output;
            }
        }
    }

    output.push_str(&text[cursor..]);
    output
}

/// Byte length of the span up to (excluding) the parenthesis that closes
/// an already-open group, or `None` if the group never closes.
fn balanced_span(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}
