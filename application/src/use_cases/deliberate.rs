//! Deliberation coordinator
//!
//! Runs the three-stage council protocol for one request:
//!
//! 1. **Generate**: every roster member drafts concurrently
//! 2. **Rank**: members anonymously rank the surviving drafts
//! 3. **Synthesize**: the chair rewrites the winning draft
//!
//! Failures local to one participant are absorbed as data (error drafts,
//! dropped rankings). The only fatal failure is the chair's synthesis
//! call.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::ProgressSink;
use council_domain::{
    calc, extract_ranking, util, Actor, DeliberationOutcome, Draft, Label, LabelMap,
    ProgressEvent, PromptTemplate, Ranking, Roster, ScoreTable, Stage,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Peer comments quoted in the synthesis prompt are cut to this many
/// bytes so a verbose reviewer cannot crowd out the winning draft.
const COMMENT_EXCERPT_BYTES: usize = 200;

/// Errors that can end a deliberation run.
///
/// Per-participant failures never surface here; they are recorded in
/// the outcome instead.
#[derive(Error, Debug)]
pub enum DeliberationError {
    #[error("synthesis failed: {0}")]
    SynthesisFailed(#[from] GatewayError),
}

/// Use case for running one council deliberation.
pub struct DeliberateUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> DeliberateUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Run all three stages against the fixed roster.
    pub async fn run(
        &self,
        query: &str,
        context: &str,
        roster: &Roster,
        progress: &dyn ProgressSink,
    ) -> Result<DeliberationOutcome, DeliberationError> {
        info!("starting deliberation with {} members", roster.len());

        let drafts = self.stage_generate(query, context, roster, progress).await;
        let (rankings, label_map) = self.stage_rank(&drafts, roster, progress).await;
        self.stage_synthesize(query, drafts, rankings, &label_map, roster, progress)
            .await
    }

    /// Stage 1: one generation call per member, all in flight at once.
    /// Always yields exactly one draft per roster member.
    async fn stage_generate(
        &self,
        query: &str,
        context: &str,
        roster: &Roster,
        progress: &dyn ProgressSink,
    ) -> Vec<Draft> {
        progress.emit(
            ProgressEvent::started(Stage::Generate, Actor::System)
                .with_detail(format!("{} members drafting", roster.len())),
        );

        let prompt = PromptTemplate::draft_prompt(query, context);
        let mut join_set = JoinSet::new();

        for member in roster.participants() {
            progress.emit(ProgressEvent::started(
                Stage::Generate,
                Actor::Participant(member.id.clone()),
            ));

            let gateway = Arc::clone(&self.gateway);
            let member = member.clone();
            let prompt = prompt.clone();

            join_set.spawn(async move {
                let result = gateway.complete(&member, &prompt).await;
                (member.id, result)
            });
        }

        let mut drafts = Vec::new();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((id, Ok(text))) => {
                    debug!("{id} submitted a draft");
                    let processed = calc::substitute_markup(&text);
                    progress.emit(ProgressEvent::done(
                        Stage::Generate,
                        Actor::Participant(id.clone()),
                    ));
                    drafts.push(Draft::text(id, processed));
                }
                Ok((id, Err(error))) => {
                    warn!("{id} failed to draft: {error}");
                    progress.emit(ProgressEvent::error(
                        Stage::Generate,
                        Actor::Participant(id.clone()),
                        error.to_string(),
                    ));
                    drafts.push(Draft::error(id, error.to_string()));
                }
                Err(error) => {
                    warn!("draft task join error: {error}");
                }
            }
        }

        progress.emit(ProgressEvent::done(Stage::Generate, Actor::System));
        drafts
    }

    /// Stage 2: anonymize the surviving drafts and collect one ranking
    /// per reviewer whose call succeeds. Every roster member reviews,
    /// including those whose own draft failed.
    async fn stage_rank(
        &self,
        drafts: &[Draft],
        roster: &Roster,
        progress: &dyn ProgressSink,
    ) -> (Vec<Ranking>, LabelMap) {
        let survivors: Vec<(&Draft, &str)> = drafts
            .iter()
            .filter_map(|draft| draft.content().map(|content| (draft, content)))
            .collect();

        let label_map =
            LabelMap::assign(survivors.iter().map(|(draft, _)| draft.participant().clone()));

        if label_map.is_empty() {
            info!("no drafts survived; skipping peer review");
            return (Vec::new(), label_map);
        }

        progress.emit(
            ProgressEvent::started(Stage::Rank, Actor::System)
                .with_detail(format!("{} drafts under review", label_map.len())),
        );

        let labeled: Vec<(Label, &str)> = label_map
            .labels()
            .zip(survivors.iter().map(|(_, content)| *content))
            .collect();
        let prompt = PromptTemplate::review_prompt(&labeled);

        let mut join_set = JoinSet::new();

        for member in roster.participants() {
            progress.emit(ProgressEvent::started(
                Stage::Rank,
                Actor::Participant(member.id.clone()),
            ));

            let gateway = Arc::clone(&self.gateway);
            let member = member.clone();
            let prompt = prompt.clone();

            join_set.spawn(async move {
                let result = gateway.complete(&member, &prompt).await;
                (member.id, result)
            });
        }

        let mut rankings = Vec::new();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((id, Ok(text))) => {
                    let order = extract_ranking(&text);
                    let detail = if order.is_empty() {
                        debug!("{id} returned a verdict with no parseable ranking");
                        "no ranking found".to_string()
                    } else {
                        order
                            .iter()
                            .map(Label::to_string)
                            .collect::<Vec<_>>()
                            .join(" > ")
                    };
                    progress.emit(
                        ProgressEvent::done(Stage::Rank, Actor::Participant(id.clone()))
                            .with_detail(detail),
                    );
                    rankings.push(Ranking::new(id, text, order));
                }
                Ok((id, Err(error))) => {
                    // Dropped, not retried: a failed reviewer just
                    // contributes no votes.
                    warn!("{id} ranking failed: {error}");
                    progress.emit(ProgressEvent::error(
                        Stage::Rank,
                        Actor::Participant(id.clone()),
                        error.to_string(),
                    ));
                }
                Err(error) => {
                    warn!("review task join error: {error}");
                }
            }
        }

        progress.emit(ProgressEvent::done(Stage::Rank, Actor::System));
        (rankings, label_map)
    }

    /// Stage 3: tally the rankings and have the chair synthesize the
    /// final answer from the winning draft. Zero outbound calls when no
    /// draft survived.
    async fn stage_synthesize(
        &self,
        query: &str,
        drafts: Vec<Draft>,
        rankings: Vec<Ranking>,
        label_map: &LabelMap,
        roster: &Roster,
        progress: &dyn ProgressSink,
    ) -> Result<DeliberationOutcome, DeliberationError> {
        if label_map.is_empty() {
            return Ok(DeliberationOutcome::no_consensus(drafts));
        }

        progress.emit(
            ProgressEvent::started(Stage::Synthesize, Actor::System)
                .with_detail("tallying rankings"),
        );

        let mut table = ScoreTable::seeded(label_map.labels());
        table.tally(&rankings);

        let Some(winner) = table.winner() else {
            // Unreachable with a non-empty label map; kept so the type
            // system never forces a panic here.
            return Ok(DeliberationOutcome::no_consensus(drafts));
        };

        let Some(author) = label_map.get(winner).cloned() else {
            // The winner is always a label map key; see ScoreTable::seeded.
            return Ok(DeliberationOutcome::no_consensus(drafts));
        };
        progress.emit(
            ProgressEvent::done(Stage::Synthesize, Actor::System).with_detail(format!(
                "solution {winner} selected ({} points)",
                table.get(winner).unwrap_or(0)
            )),
        );
        info!("winner: solution {winner} by {author}");

        let winning_draft = drafts
            .iter()
            .find(|draft| draft.participant() == &author)
            .and_then(Draft::content)
            .unwrap_or_default()
            .to_string();

        let comments: Vec<(String, String)> = rankings
            .iter()
            .map(|ranking| {
                (
                    ranking.reviewer.to_string(),
                    util::excerpt(&ranking.raw_text, COMMENT_EXCERPT_BYTES),
                )
            })
            .collect();

        let prompt = PromptTemplate::synthesis_prompt(query, winner, &winning_draft, &comments);
        let chair = roster.chair();

        progress.emit(ProgressEvent::started(
            Stage::Synthesize,
            Actor::Participant(chair.id.clone()),
        ));

        match self.gateway.complete(chair, &prompt).await {
            Ok(answer) => {
                progress.emit(ProgressEvent::done(
                    Stage::Synthesize,
                    Actor::Participant(chair.id.clone()),
                ));
                Ok(DeliberationOutcome::synthesized(
                    answer, winner, drafts, rankings,
                ))
            }
            Err(error) => {
                progress.emit(ProgressEvent::error(
                    Stage::Synthesize,
                    Actor::Participant(chair.id.clone()),
                    error.to_string(),
                ));
                Err(DeliberationError::SynthesisFailed(error))
            }
        }
    }
}
