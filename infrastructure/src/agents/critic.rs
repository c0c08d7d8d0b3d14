//! LLM-backed critic.
//!
//! Reviews the finished answer for physical plausibility, unit
//! consistency, and safety factors, using one designated reviewer
//! participant.

use async_trait::async_trait;
use council_application::{CollaboratorError, Critic, LlmGateway};
use council_domain::{Participant, PromptTemplate};
use std::sync::Arc;
use tracing::debug;

pub struct LlmCritic<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    reviewer: Participant,
}

impl<G: LlmGateway + 'static> LlmCritic<G> {
    pub fn new(gateway: Arc<G>, reviewer: Participant) -> Self {
        Self { gateway, reviewer }
    }
}

#[async_trait]
impl<G: LlmGateway + 'static> Critic for LlmCritic<G> {
    async fn review(
        &self,
        query: &str,
        plan: &str,
        answer: &str,
    ) -> Result<String, CollaboratorError> {
        debug!("critic {} reviewing final answer", self.reviewer.id);
        let prompt = PromptTemplate::critic_prompt(query, plan, answer);
        self.gateway
            .complete(&self.reviewer, &prompt)
            .await
            .map_err(|e| CollaboratorError::new(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::exam::tests::FakeGateway;
    use council_domain::{Credential, Provider};

    #[tokio::test]
    async fn critic_prompts_with_query_and_answer() {
        let gateway = Arc::new(FakeGateway::replying("APPROVED. Result is plausible."));
        let reviewer = Participant::new(
            "critic",
            Provider::OpenAi,
            "gpt-4o",
            Credential::new("sk-x"),
        );
        let critic = LlmCritic::new(Arc::clone(&gateway), reviewer);

        let verdict = critic
            .review("Footing width?", "Council deliberation", "B = 2 m")
            .await
            .unwrap();

        assert!(verdict.starts_with("APPROVED."));
        let prompt = gateway.last_prompt();
        assert!(prompt.contains("Footing width?"));
        assert!(prompt.contains("B = 2 m"));
    }
}
