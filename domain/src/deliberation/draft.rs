//! Draft responses from the generation stage.

use crate::core::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// What a generation call produced: answer text, or the error that
/// replaced it. Error drafts stay in the record (Stage 1 always yields
/// one draft per participant) but are excluded from review and synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DraftBody {
    Text(String),
    Error(String),
}

/// One participant's independent answer attempt. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    participant: ParticipantId,
    body: DraftBody,
}

impl Draft {
    pub fn text(participant: impl Into<ParticipantId>, content: impl Into<String>) -> Self {
        Self {
            participant: participant.into(),
            body: DraftBody::Text(content.into()),
        }
    }

    pub fn error(participant: impl Into<ParticipantId>, message: impl Into<String>) -> Self {
        Self {
            participant: participant.into(),
            body: DraftBody::Error(message.into()),
        }
    }

    pub fn participant(&self) -> &ParticipantId {
        &self.participant
    }

    /// The draft text, or `None` for an error draft.
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            DraftBody::Text(content) => Some(content),
            DraftBody::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.body {
            DraftBody::Text(_) => None,
            DraftBody::Error(message) => Some(message),
        }
    }

    pub fn survived(&self) -> bool {
        matches!(self.body, DraftBody::Text(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_draft_survives() {
        let draft = Draft::text("alpha", "The answer is 42.");
        assert!(draft.survived());
        assert_eq!(draft.content(), Some("The answer is 42."));
        assert_eq!(draft.error_message(), None);
    }

    #[test]
    fn error_draft_is_excluded() {
        let draft = Draft::error("beta", "quota exceeded");
        assert!(!draft.survived());
        assert_eq!(draft.content(), None);
        assert_eq!(draft.error_message(), Some("quota exceeded"));
    }
}
