//! HTTP adapters for the external generation services.
//!
//! One gateway serves the whole roster: each participant carries its
//! provider family, and the family picks the wire protocol: Anthropic's
//! messages API, or OpenAI-style chat completions for everything else
//! (OpenAI, DeepSeek, Mistral, and any configured compatible endpoint).

pub mod anthropic;
pub mod openai;

use crate::config::file_config::ProvidersSection;
use async_trait::async_trait;
use council_application::{GatewayError, LlmGateway};
use council_domain::{Participant, Provider};
use std::time::Duration;
use tracing::debug;

/// Outbound calls wait this long before the underlying client gives up.
/// This is the only stall bound in the system.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Gateway that completes prompts over HTTPS against the configured
/// provider endpoints.
pub struct HttpLlmGateway {
    client: reqwest::Client,
    endpoints: ProvidersSection,
}

impl HttpLlmGateway {
    pub fn new(endpoints: ProvidersSection) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        Ok(Self { client, endpoints })
    }
}

#[async_trait]
impl LlmGateway for HttpLlmGateway {
    async fn complete(
        &self,
        participant: &Participant,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        if participant.credential.is_empty() {
            return Err(GatewayError::MissingCredential(participant.id.to_string()));
        }

        let base_url = self
            .endpoints
            .base_url(&participant.provider)
            .ok_or_else(|| GatewayError::UnknownProvider(participant.provider.to_string()))?;

        debug!(
            "completing as {} via {} ({} prompt bytes)",
            participant.id,
            participant.provider,
            prompt.len()
        );

        match participant.provider {
            Provider::Anthropic => {
                anthropic::complete(&self.client, base_url, participant, prompt).await
            }
            _ => openai::complete(&self.client, base_url, participant, prompt).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::Credential;

    fn gateway() -> HttpLlmGateway {
        HttpLlmGateway::new(ProvidersSection::default()).unwrap()
    }

    #[tokio::test]
    async fn empty_credential_is_rejected_before_any_io() {
        let participant = Participant::new(
            "alpha",
            Provider::DeepSeek,
            "deepseek-chat",
            Credential::new(""),
        );
        let error = gateway().complete(&participant, "hi").await.unwrap_err();
        assert!(matches!(error, GatewayError::MissingCredential(_)));
    }

    #[tokio::test]
    async fn unconfigured_compatible_provider_is_rejected() {
        let participant = Participant::new(
            "alpha",
            Provider::Compatible("groq".to_string()),
            "llama-70b",
            Credential::new("sk-x"),
        );
        let error = gateway().complete(&participant, "hi").await.unwrap_err();
        assert!(matches!(error, GatewayError::UnknownProvider(_)));
    }
}
