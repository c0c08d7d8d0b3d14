//! Council roster configuration (`[council]` section).

use crate::config::ConfigError;
use council_domain::{Credential, Participant, Roster};
use serde::{Deserialize, Serialize};

/// One configured participant. The credential is resolved from the
/// named environment variable when the roster is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantEntry {
    pub id: String,
    pub provider: String,
    pub model: String,
    pub api_key_env: String,
}

impl ParticipantEntry {
    fn resolve(&self) -> Result<Participant, ConfigError> {
        let key = std::env::var(&self.api_key_env).map_err(|_| ConfigError::MissingCredential {
            id: self.id.clone(),
            env: self.api_key_env.clone(),
        })?;
        // Provider parsing is infallible: unknown names become
        // Compatible endpoints resolved by the providers section.
        let provider = self.provider.parse().unwrap();
        Ok(Participant::new(
            self.id.as_str(),
            provider,
            self.model.as_str(),
            Credential::new(key),
        ))
    }
}

/// The `[council]` section: drafting pool plus optional chair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouncilSection {
    pub participants: Vec<ParticipantEntry>,
    /// Synthesis chair; defaults to the first participant.
    pub chair: Option<ParticipantEntry>,
}

impl CouncilSection {
    /// Resolve all credentials and build the validated roster.
    pub fn to_roster(&self) -> Result<Roster, ConfigError> {
        let first = self
            .participants
            .first()
            .ok_or(ConfigError::NoParticipants)?;

        let chair = self.chair.as_ref().unwrap_or(first).resolve()?;
        let pool = self
            .participants
            .iter()
            .map(ParticipantEntry::resolve)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Roster::new(pool, chair)?)
    }
}
