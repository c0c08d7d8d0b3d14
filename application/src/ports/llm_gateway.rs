//! LLM Gateway port
//!
//! Defines the one operation the deliberation engine needs from a
//! text-generation service: complete a prompt as a given participant.

use async_trait::async_trait;
use council_domain::Participant;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("no credential configured for participant '{0}'")]
    MissingCredential(String),

    #[error("no endpoint configured for provider '{0}'")]
    UnknownProvider(String),
}

/// Gateway for outbound generation calls.
///
/// A participant carries its own service family, model name, and
/// credential, so one gateway instance serves the whole roster.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a prompt as `participant` and return the response text.
    async fn complete(&self, participant: &Participant, prompt: &str)
    -> Result<String, GatewayError>;
}
