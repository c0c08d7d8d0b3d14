//! Vote aggregation over parsed rankings.

use super::label::Label;
use super::ranking::Ranking;
use serde::Serialize;
use std::collections::BTreeMap;

/// Points awarded to the top-ranked draft; each following position earns
/// one point less, down to zero.
const TOP_POINTS: u32 = 3;

/// Accumulated points per label.
///
/// Seeded with zero for every label in the label map, so the key set is
/// fixed before any votes arrive. Backed by a `BTreeMap`, which makes
/// iteration order, and therefore the tie-break, lexicographic by
/// label: on equal scores the smallest label wins.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoreTable {
    scores: BTreeMap<Label, u32>,
}

impl ScoreTable {
    /// A table with a zero entry for each given label.
    pub fn seeded(labels: impl IntoIterator<Item = Label>) -> Self {
        Self {
            scores: labels.into_iter().map(|label| (label, 0)).collect(),
        }
    }

    /// Accumulate every ranking: position `i` in a parsed order earns
    /// `max(0, 3 - i)` points. Labels outside the table are ignored, as
    /// are duplicate mentions beyond what the reviewer wrote.
    pub fn tally(&mut self, rankings: &[Ranking]) {
        for ranking in rankings {
            for (position, label) in ranking.order.iter().enumerate() {
                let points = TOP_POINTS.saturating_sub(position as u32);
                if points == 0 {
                    break;
                }
                if let Some(score) = self.scores.get_mut(label) {
                    *score += points;
                }
            }
        }
    }

    pub fn get(&self, label: Label) -> Option<u32> {
        self.scores.get(&label).copied()
    }

    /// The label with the maximum score. Ties resolve to the smallest
    /// label, since iteration is ordered and only a strictly greater
    /// score displaces the current leader.
    pub fn winner(&self) -> Option<Label> {
        let mut leader: Option<(Label, u32)> = None;
        for (&label, &score) in &self.scores {
            match leader {
                Some((_, best)) if score <= best => {}
                _ => leader = Some((label, score)),
            }
        }
        leader.map(|(label, _)| label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, u32)> + '_ {
        self.scores.iter().map(|(&label, &score)| (label, score))
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranking(reviewer: &str, order: &str) -> Ranking {
        let labels = order
            .chars()
            .map(|c| Label::parse_char(c).unwrap())
            .collect();
        Ranking::new(reviewer, "raw", labels)
    }

    fn seeded_abc() -> ScoreTable {
        ScoreTable::seeded([Label::A, Label::B, Label::C])
    }

    #[test]
    fn positional_points() {
        let mut table = seeded_abc();
        table.tally(&[ranking("r1", "ABC"), ranking("r2", "BAC")]);
        assert_eq!(table.get(Label::A), Some(5)); // 3 + 2
        assert_eq!(table.get(Label::B), Some(5)); // 2 + 3
        assert_eq!(table.get(Label::C), Some(2)); // 1 + 1
    }

    #[test]
    fn tie_resolves_to_smallest_label() {
        let mut table = seeded_abc();
        table.tally(&[ranking("r1", "ABC"), ranking("r2", "BAC")]);
        assert_eq!(table.winner(), Some(Label::A));
    }

    #[test]
    fn positions_beyond_podium_earn_nothing() {
        let mut table = ScoreTable::seeded(Label::alphabet());
        table.tally(&[ranking("r1", "ABCDE")]);
        assert_eq!(table.get(Label::C), Some(1));
        assert_eq!(table.get(Label::D), Some(0));
        assert_eq!(table.get(Label::E), Some(0));
    }

    #[test]
    fn empty_order_contributes_nothing() {
        let mut table = seeded_abc();
        table.tally(&[Ranking::new("r1", "nothing parseable", vec![])]);
        assert_eq!(table.get(Label::A), Some(0));
        assert_eq!(table.winner(), Some(Label::A));
    }

    #[test]
    fn labels_outside_table_are_ignored() {
        let mut table = ScoreTable::seeded([Label::A, Label::B]);
        table.tally(&[ranking("r1", "CAB")]);
        assert_eq!(table.get(Label::A), Some(2));
        assert_eq!(table.get(Label::B), Some(1));
        assert_eq!(table.get(Label::C), None);
        assert_eq!(table.winner(), Some(Label::A));
    }

    #[test]
    fn empty_table_has_no_winner() {
        let table = ScoreTable::default();
        assert_eq!(table.winner(), None);
        assert!(table.is_empty());
    }
}
