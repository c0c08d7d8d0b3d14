//! Exam council.
//!
//! Drafts an exam paper in three steps: the board proposes structures in
//! parallel, the chair consolidates them into one plan, a single author
//! writes the paper, and an external examiner signs off, with one
//! refinement round if the sign-off fails.

use super::contains_approval;
use async_trait::async_trait;
use council_application::{CollaboratorError, ExamDrafter, LlmGateway};
use council_domain::{PromptTemplate, Roster};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

pub struct ExamCouncil<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    roster: Arc<Roster>,
}

impl<G: LlmGateway + 'static> ExamCouncil<G> {
    pub fn new(gateway: Arc<G>, roster: Arc<Roster>) -> Self {
        Self { gateway, roster }
    }

    /// Ask every board member for a structure proposal; failed members
    /// simply contribute nothing.
    async fn collect_proposals(&self, query: &str, context: &str) -> Vec<(String, String)> {
        let prompt = PromptTemplate::exam_structure_prompt(query, context);
        let mut join_set = JoinSet::new();

        for member in self.roster.participants() {
            let gateway = Arc::clone(&self.gateway);
            let member = member.clone();
            let prompt = prompt.clone();
            join_set.spawn(async move {
                let result = gateway.complete(&member, &prompt).await;
                (member.id, result)
            });
        }

        let mut proposals = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((id, Ok(text))) => proposals.push((id.to_string(), text)),
                Ok((id, Err(error))) => warn!("{id} failed to propose a structure: {error}"),
                Err(error) => warn!("proposal task join error: {error}"),
            }
        }
        proposals
    }
}

#[async_trait]
impl<G: LlmGateway + 'static> ExamDrafter for ExamCouncil<G> {
    async fn draft(&self, query: &str, context: &str) -> Result<String, CollaboratorError> {
        info!("exam council session started");
        let collaborator = |e: council_application::GatewayError| CollaboratorError::new(e.to_string());

        let proposals = self.collect_proposals(query, context).await;
        if proposals.is_empty() {
            return Err(CollaboratorError::new(
                "every board member failed to propose an exam structure",
            ));
        }

        let chair = self.roster.chair();
        let plan = self
            .gateway
            .complete(chair, &PromptTemplate::exam_plan_prompt(&proposals))
            .await
            .map_err(collaborator)?;
        debug!("exam plan agreed ({} bytes)", plan.len());

        // One author writes the paper; the member at the other end of
        // the roster examines it, so the two roles differ whenever the
        // board has more than one member.
        let participants = self.roster.participants();
        let author = &participants[0];
        let examiner = &participants[participants.len() - 1];

        let paper = self
            .gateway
            .complete(author, &PromptTemplate::exam_author_prompt(&plan))
            .await
            .map_err(collaborator)?;

        let review = self
            .gateway
            .complete(examiner, &PromptTemplate::exam_review_prompt(&paper))
            .await
            .map_err(collaborator)?;

        if contains_approval(&review) {
            return Ok(paper);
        }

        info!("exam draft rejected; refining once");
        self.gateway
            .complete(chair, &PromptTemplate::exam_refine_prompt(&paper, &review))
            .await
            .map_err(collaborator)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use council_application::GatewayError;
    use council_domain::{Credential, Participant, Provider};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Gateway fake: scripted replies per participant in call order,
    /// with an optional catch-all reply.
    pub struct FakeGateway {
        replies: Mutex<HashMap<String, Vec<Result<String, String>>>>,
        default_reply: Option<String>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeGateway {
        pub fn new() -> Self {
            Self {
                replies: Mutex::new(HashMap::new()),
                default_reply: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Every unscripted call returns this text.
        pub fn replying(text: &str) -> Self {
            let mut gateway = Self::new();
            gateway.default_reply = Some(text.to_string());
            gateway
        }

        pub fn script(self, id: &str, reply: Result<&str, &str>) -> Self {
            self.replies
                .lock()
                .unwrap()
                .entry(id.to_string())
                .or_default()
                .push(reply.map(str::to_string).map_err(str::to_string));
            self
        }

        pub fn last_prompt(&self) -> String {
            self.calls.lock().unwrap().last().unwrap().1.clone()
        }
    }

    #[async_trait]
    impl LlmGateway for FakeGateway {
        async fn complete(
            &self,
            participant: &Participant,
            prompt: &str,
        ) -> Result<String, GatewayError> {
            self.calls
                .lock()
                .unwrap()
                .push((participant.id.to_string(), prompt.to_string()));

            let scripted = self
                .replies
                .lock()
                .unwrap()
                .get_mut(participant.id.as_str())
                .and_then(|queue| (!queue.is_empty()).then(|| queue.remove(0)));

            match scripted {
                Some(Ok(text)) => Ok(text),
                Some(Err(message)) => Err(GatewayError::RequestFailed(message)),
                None => match &self.default_reply {
                    Some(text) => Ok(text.clone()),
                    None => Err(GatewayError::RequestFailed(format!(
                        "no scripted reply for {}",
                        participant.id
                    ))),
                },
            }
        }
    }

    fn member(id: &str) -> Participant {
        Participant::new(
            id,
            Provider::DeepSeek,
            "deepseek-chat",
            Credential::new("sk-test"),
        )
    }

    fn board(ids: &[&str]) -> Arc<Roster> {
        Arc::new(Roster::new(ids.iter().map(|id| member(id)).collect(), member("chair")).unwrap())
    }

    #[tokio::test]
    async fn approved_draft_is_returned_unchanged() {
        let gateway = FakeGateway::new()
            .script("alpha", Ok("Proposal: five questions"))
            .script("beta", Ok("Proposal: three questions"))
            .script("chair", Ok("Plan: four questions"))
            .script("alpha", Ok("**Question 1** (10 points): ..."))
            .script("beta", Ok("APPROVED"));
        let council = ExamCouncil::new(Arc::new(gateway), board(&["alpha", "beta"]));

        let paper = council.draft("Generate an exam", "ctx").await.unwrap();
        assert!(paper.contains("Question 1"));
    }

    #[tokio::test]
    async fn rejected_draft_gets_one_refinement() {
        let gateway = FakeGateway::new()
            .script("alpha", Ok("Proposal"))
            .script("beta", Ok("Proposal"))
            .script("chair", Ok("Plan"))
            .script("alpha", Ok("Draft v1"))
            .script("beta", Ok("REJECTED: question 2 is ambiguous"))
            .script("chair", Ok("Draft v2, refined"));
        let council = ExamCouncil::new(Arc::new(gateway), board(&["alpha", "beta"]));

        let paper = council.draft("Generate an exam", "ctx").await.unwrap();
        assert_eq!(paper, "Draft v2, refined");
    }

    #[tokio::test]
    async fn failed_proposers_are_tolerated() {
        let gateway = FakeGateway::new()
            .script("alpha", Err("down"))
            .script("beta", Ok("Proposal from beta"))
            .script("chair", Ok("Plan"))
            .script("alpha", Ok("Draft"))
            .script("beta", Ok("APPROVED"));
        let council = ExamCouncil::new(Arc::new(gateway), board(&["alpha", "beta"]));

        assert!(council.draft("Generate an exam", "ctx").await.is_ok());
    }

    #[tokio::test]
    async fn all_proposers_failing_fails_the_exam() {
        let gateway = FakeGateway::new()
            .script("alpha", Err("down"))
            .script("beta", Err("down"));
        let council = ExamCouncil::new(Arc::new(gateway), board(&["alpha", "beta"]));

        let error = council.draft("Generate an exam", "ctx").await.unwrap_err();
        assert!(error.to_string().contains("failed to propose"));
    }
}
