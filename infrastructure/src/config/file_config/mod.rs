//! TOML file configuration model.
//!
//! Sections map one-to-one onto the file:
//!
//! ```toml
//! [[council.participants]]
//! id = "deepseek"
//! provider = "deepseek"
//! model = "deepseek-chat"
//! api_key_env = "DEEPSEEK_API_KEY"
//!
//! [council.chair]
//! id = "chair"
//! provider = "deepseek"
//! model = "deepseek-chat"
//! api_key_env = "DEEPSEEK_API_KEY"
//!
//! [retrieval]
//! endpoint = "http://localhost:8900/retrieve"
//!
//! [transcript]
//! path = "deliberation.jsonl"
//! ```
//!
//! Credentials never live in the file; entries name the environment
//! variable that holds the key.

pub mod council;
pub mod providers;
pub mod retrieval;
pub mod transcript;

pub use council::{CouncilSection, ParticipantEntry};
pub use providers::ProvidersSection;
pub use retrieval::RetrievalSection;
pub use transcript::TranscriptSection;

use serde::{Deserialize, Serialize};

/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub council: CouncilSection,
    pub providers: ProvidersSection,
    pub retrieval: RetrievalSection,
    pub transcript: TranscriptSection,
}
