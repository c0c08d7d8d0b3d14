//! Ranking value object.

use super::label::Label;
use crate::core::participant::ParticipantId;
use serde::Serialize;

/// One reviewer's verdict over the anonymized drafts: the raw review
/// text plus the ordered preference the rank extractor recovered from
/// it. An empty order is valid; it simply contributes no votes.
#[derive(Debug, Clone, Serialize)]
pub struct Ranking {
    pub reviewer: ParticipantId,
    pub raw_text: String,
    pub order: Vec<Label>,
}

impl Ranking {
    pub fn new(
        reviewer: impl Into<ParticipantId>,
        raw_text: impl Into<String>,
        order: Vec<Label>,
    ) -> Self {
        Self {
            reviewer: reviewer.into(),
            raw_text: raw_text.into(),
            order,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Render the order as `A > C > B` for logs and progress details.
    pub fn order_summary(&self) -> String {
        self.order
            .iter()
            .map(Label::to_string)
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_summary_formats_chain() {
        let ranking = Ranking::new("alpha", "raw", vec![Label::A, Label::C, Label::B]);
        assert_eq!(ranking.order_summary(), "A > C > B");
        assert!(!ranking.is_empty());
    }

    #[test]
    fn empty_order_is_valid() {
        let ranking = Ranking::new("alpha", "no preference stated", vec![]);
        assert!(ranking.is_empty());
        assert_eq!(ranking.order_summary(), "");
    }
}
