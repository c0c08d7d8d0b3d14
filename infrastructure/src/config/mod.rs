//! Configuration: TOML file model and multi-source loader.

pub mod file_config;
pub mod loader;

pub use file_config::FileConfig;
pub use loader::ConfigLoader;

use council_domain::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("no council participants configured")]
    NoParticipants,

    #[error("participant '{id}' has no credential: environment variable {env} is not set")]
    MissingCredential { id: String, env: String },

    #[error(transparent)]
    InvalidRoster(#[from] DomainError),
}
