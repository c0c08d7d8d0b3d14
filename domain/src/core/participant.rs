//! Participant registry value objects.
//!
//! A [`Participant`] is one configured external generation identity. The
//! [`Roster`] is the process-wide registry: built once at startup from
//! configuration and passed by reference into the deliberation use cases,
//! never mutated afterwards.

use super::error::DomainError;
use crate::deliberation::label::Label;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identity of one council member (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// External-service family a participant belongs to.
///
/// The family decides which wire protocol the gateway speaks; the model
/// name inside the family is free-form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    DeepSeek,
    Mistral,
    Anthropic,
    /// Any other OpenAI-compatible endpoint, keyed by a name the
    /// configuration maps to a base URL.
    Compatible(String),
}

impl Provider {
    pub fn as_str(&self) -> &str {
        match self {
            Provider::OpenAi => "openai",
            Provider::DeepSeek => "deepseek",
            Provider::Mistral => "mistral",
            Provider::Anthropic => "anthropic",
            Provider::Compatible(name) => name,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "openai" | "gpt" => Provider::OpenAi,
            "deepseek" => Provider::DeepSeek,
            "mistral" => Provider::Mistral,
            "anthropic" | "claude" => Provider::Anthropic,
            other => Provider::Compatible(other.to_string()),
        })
    }
}

impl Serialize for Provider {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap())
    }
}

/// An API credential that never leaks through `Debug` or logging.
///
/// The raw key is only reachable via [`Credential::expose`], which keeps
/// accidental `{:?}` formatting of a [`Participant`] safe to log.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Return the raw secret. Call sites should be the only places the
    /// key crosses into a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential(***)")
    }
}

/// One configured council member: identity, service family, model name,
/// credential. Read-only after process start.
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: ParticipantId,
    pub provider: Provider,
    pub model: String,
    pub credential: Credential,
}

impl Participant {
    pub fn new(
        id: impl Into<ParticipantId>,
        provider: Provider,
        model: impl Into<String>,
        credential: Credential,
    ) -> Self {
        Self {
            id: id.into(),
            provider,
            model: model.into(),
            credential,
        }
    }
}

/// The fixed participant registry plus the designated chair.
///
/// The chair synthesizes the final answer in Stage 3 and may, but need
/// not, also be a member of the drafting pool.
#[derive(Debug, Clone)]
pub struct Roster {
    participants: Vec<Participant>,
    chair: Participant,
}

impl Roster {
    /// Build a validated roster. The pool must have at least one member
    /// and no more members than the label alphabet can anonymize.
    pub fn new(participants: Vec<Participant>, chair: Participant) -> Result<Self, DomainError> {
        if participants.is_empty() {
            return Err(DomainError::EmptyRoster);
        }
        if participants.len() > Label::COUNT {
            return Err(DomainError::RosterTooLarge {
                count: participants.len(),
                max: Label::COUNT,
            });
        }
        Ok(Self {
            participants,
            chair,
        })
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn chair(&self) -> &Participant {
        &self.chair
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn find(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str) -> Participant {
        Participant::new(
            id,
            Provider::DeepSeek,
            "deepseek-chat",
            Credential::new("sk-test"),
        )
    }

    #[test]
    fn provider_parse_aliases() {
        assert_eq!("gpt".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!("claude".parse::<Provider>().unwrap(), Provider::Anthropic);
        assert_eq!(
            "groq".parse::<Provider>().unwrap(),
            Provider::Compatible("groq".to_string())
        );
    }

    #[test]
    fn provider_roundtrip() {
        for p in [
            Provider::OpenAi,
            Provider::DeepSeek,
            Provider::Mistral,
            Provider::Anthropic,
        ] {
            let parsed: Provider = p.as_str().parse().unwrap();
            assert_eq!(p, parsed);
        }
    }

    #[test]
    fn credential_debug_hides_secret() {
        let participant = member("alpha");
        let printed = format!("{participant:?}");
        assert!(!printed.contains("sk-test"));
        assert!(printed.contains("Credential(***)"));
    }

    #[test]
    fn roster_rejects_empty_pool() {
        let err = Roster::new(vec![], member("chair")).unwrap_err();
        assert!(matches!(err, DomainError::EmptyRoster));
    }

    #[test]
    fn roster_rejects_oversized_pool() {
        let pool = (0..6).map(|i| member(&format!("m{i}"))).collect();
        let err = Roster::new(pool, member("chair")).unwrap_err();
        assert!(matches!(err, DomainError::RosterTooLarge { count: 6, .. }));
    }

    #[test]
    fn roster_find_by_id() {
        let roster = Roster::new(vec![member("alpha"), member("beta")], member("chair")).unwrap();
        assert!(roster.find(&"beta".into()).is_some());
        assert!(roster.find(&"gamma".into()).is_none());
        assert_eq!(roster.len(), 2);
    }
}
