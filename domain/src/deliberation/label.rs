//! Anonymizing labels for peer review.
//!
//! During Stage 2 reviewers must not know who wrote which draft, so each
//! surviving draft is published under a single-letter label. The
//! [`LabelMap`] is the only record of authorship and is built exactly
//! once per request.

use crate::core::error::DomainError;
use crate::core::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// A short anonymizing label, one of the first [`Label::COUNT`] letters
/// of the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(char);

impl Label {
    /// Size of the label alphabet, and therefore the maximum number of
    /// drafts one review round can anonymize.
    pub const COUNT: usize = 5;

    pub const A: Label = Label('A');
    pub const B: Label = Label('B');
    pub const C: Label = Label('C');
    pub const D: Label = Label('D');
    pub const E: Label = Label('E');

    /// All labels in alphabet order.
    pub fn alphabet() -> impl Iterator<Item = Label> {
        ('A'..='E').map(Label)
    }

    /// Label for the i-th draft (0-indexed), if the alphabet reaches it.
    pub fn from_index(index: usize) -> Option<Label> {
        (index < Self::COUNT).then(|| Label((b'A' + index as u8) as char))
    }

    /// Parse a single character, accepting lowercase.
    pub fn parse_char(c: char) -> Result<Label, DomainError> {
        let upper = c.to_ascii_uppercase();
        if ('A'..='E').contains(&upper) {
            Ok(Label(upper))
        } else {
            Err(DomainError::UnknownLabel(c))
        }
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bijection from label to draft author, in discovery order.
///
/// Built from the surviving drafts of Stage 1; authors beyond the label
/// alphabet are left unlabeled (the roster bound makes that unreachable
/// in practice).
#[derive(Debug, Clone, Default, Serialize)]
pub struct LabelMap {
    entries: Vec<(Label, ParticipantId)>,
}

impl LabelMap {
    /// Assign labels to the given authors in order.
    pub fn assign(authors: impl IntoIterator<Item = ParticipantId>) -> Self {
        let entries = authors
            .into_iter()
            .enumerate()
            .map_while(|(i, author)| Label::from_index(i).map(|label| (label, author)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, label: Label) -> Option<&ParticipantId> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, id)| id)
    }

    pub fn contains(&self, label: Label) -> bool {
        self.get(label).is_some()
    }

    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, &ParticipantId)> {
        self.entries.iter().map(|(label, id)| (*label, id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
