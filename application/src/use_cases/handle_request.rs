//! Request pipeline
//!
//! The state machine that sequences one incoming request:
//!
//! ```text
//! Retrieve -> Route -> { Deliberate | DraftExam } -> Critique -> Done
//! ```
//!
//! Every state executes at most once; there are no retries and no
//! backward transitions. The boundary is never allowed to crash the
//! serving process: any internal error becomes a structured failure
//! outcome, or a terminal error event on the streaming surface.

use crate::ports::critic::Critic;
use crate::ports::exam::ExamDrafter;
use crate::ports::illustrator::Illustrator;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{progress_channel, ProgressSink, ProgressStream};
use crate::ports::retriever::{KnowledgeRetriever, NO_RESULTS_CONTEXT};
use crate::ports::CollaboratorError;
use crate::use_cases::deliberate::{DeliberateUseCase, DeliberationError};
use council_domain::{
    Actor, DeliberationOutcome, ProgressEvent, Request, RequestOutcome, Roster, Stage,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Plan label handed to the critic for deliberated answers.
const DELIBERATION_PLAN: &str = "Council deliberation";

#[derive(Error, Debug)]
enum PipelineError {
    #[error(transparent)]
    Deliberation(#[from] DeliberationError),

    #[error("exam drafting failed: {0}")]
    Exam(CollaboratorError),

    #[error("critique failed: {0}")]
    Critique(CollaboratorError),
}

/// States of the request pipeline. Data flows forward through the
/// variants; nothing is revisited.
enum RequestState {
    Retrieve,
    Route { context: String },
    Deliberate { context: String },
    DraftExam { context: String },
    Critique { outcome: DeliberationOutcome },
    Done(RequestOutcome),
}

/// The full request-handling pipeline with its collaborators.
pub struct RequestPipeline<G: LlmGateway + 'static> {
    deliberation: DeliberateUseCase<G>,
    roster: Arc<Roster>,
    retriever: Arc<dyn KnowledgeRetriever>,
    critic: Arc<dyn Critic>,
    exam_drafter: Arc<dyn ExamDrafter>,
    illustrator: Option<Arc<dyn Illustrator>>,
}

impl<G: LlmGateway + 'static> RequestPipeline<G> {
    pub fn new(
        gateway: Arc<G>,
        roster: Arc<Roster>,
        retriever: Arc<dyn KnowledgeRetriever>,
        critic: Arc<dyn Critic>,
        exam_drafter: Arc<dyn ExamDrafter>,
    ) -> Self {
        Self {
            deliberation: DeliberateUseCase::new(gateway),
            roster,
            retriever,
            critic,
            exam_drafter,
            illustrator: None,
        }
    }

    /// Attach the optional mind-map collaborator.
    pub fn with_illustrator(mut self, illustrator: Arc<dyn Illustrator>) -> Self {
        self.illustrator = Some(illustrator);
        self
    }

    /// Synchronous surface: run the request to completion. Never fails;
    /// internal errors come back as `success == false` outcomes.
    pub async fn handle(&self, request: Request, progress: &dyn ProgressSink) -> RequestOutcome {
        match self.execute(&request, progress).await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!("request failed: {error}");
                RequestOutcome::failed(error.to_string())
            }
        }
    }

    /// Streaming surface: progress events while the pipeline runs on a
    /// background task, then exactly one terminal event with the result
    /// or the error.
    pub fn handle_streaming(self: Arc<Self>, request: Request) -> ProgressStream {
        let (sink, stream) = progress_channel();
        tokio::spawn(async move {
            let outcome = self.handle(request, &sink).await;
            if outcome.success {
                sink.finish(outcome);
            } else {
                let message = outcome
                    .error
                    .unwrap_or_else(|| "request failed".to_string());
                sink.fail(message);
            }
        });
        stream
    }

    async fn execute(
        &self,
        request: &Request,
        progress: &dyn ProgressSink,
    ) -> Result<RequestOutcome, PipelineError> {
        let mut state = RequestState::Retrieve;
        loop {
            state = match state {
                RequestState::Retrieve => {
                    let context = self.retrieve(request, progress).await;
                    RequestState::Route { context }
                }

                RequestState::Route { context } => {
                    // A single lexical rule; no model calls here.
                    if routes_to_exam(request.query()) {
                        debug!("routing to exam drafting");
                        RequestState::DraftExam { context }
                    } else {
                        debug!("routing to deliberation");
                        RequestState::Deliberate { context }
                    }
                }

                RequestState::Deliberate { context } => {
                    let outcome = self
                        .deliberation
                        .run(
                            &request.composed_query(),
                            &context,
                            &self.roster,
                            progress,
                        )
                        .await?;
                    RequestState::Critique { outcome }
                }

                RequestState::DraftExam { context } => {
                    progress.emit(ProgressEvent::started(Stage::DraftExam, Actor::System));
                    let paper = self
                        .exam_drafter
                        .draft(&request.composed_query(), &context)
                        .await
                        .map_err(PipelineError::Exam)?;
                    progress.emit(ProgressEvent::done(Stage::DraftExam, Actor::System));
                    // Exam generation ends the flow; no critique.
                    RequestState::Done(RequestOutcome::exam(paper))
                }

                RequestState::Critique { outcome } => {
                    progress.emit(ProgressEvent::started(Stage::Critique, Actor::System));
                    let critique = self
                        .critic
                        .review(request.query(), DELIBERATION_PLAN, &outcome.answer)
                        .await
                        .map_err(PipelineError::Critique)?;
                    progress.emit(ProgressEvent::done(Stage::Critique, Actor::System));

                    let mindmap = self.illustrate(request, &outcome.answer, progress).await;
                    RequestState::Done(
                        RequestOutcome::completed(outcome.answer, critique).with_mindmap(mindmap),
                    )
                }

                RequestState::Done(outcome) => return Ok(outcome),
            };
        }
    }

    async fn retrieve(&self, request: &Request, progress: &dyn ProgressSink) -> String {
        progress.emit(
            ProgressEvent::started(Stage::Retrieve, Actor::System)
                .with_detail("searching knowledge base"),
        );

        match self.retriever.retrieve(&request.composed_query()).await {
            Ok(context) => {
                info!("retrieved {} bytes of context", context.len());
                progress.emit(
                    ProgressEvent::done(Stage::Retrieve, Actor::System)
                        .with_detail(format!("{} words of context", context.split_whitespace().count())),
                );
                context
            }
            Err(error) => {
                // The retriever is an unreliable collaborator: degrade to
                // the empty context instead of failing the request.
                warn!("retrieval failed: {error}");
                progress.emit(ProgressEvent::error(
                    Stage::Retrieve,
                    Actor::System,
                    error.to_string(),
                ));
                NO_RESULTS_CONTEXT.to_string()
            }
        }
    }

    async fn illustrate(
        &self,
        request: &Request,
        answer: &str,
        progress: &dyn ProgressSink,
    ) -> Option<String> {
        let illustrator = self.illustrator.as_ref()?;
        if !wants_mindmap(request.query()) {
            return None;
        }

        progress.emit(ProgressEvent::started(Stage::Illustrate, Actor::System));
        match illustrator.mindmap(request.query(), answer).await {
            Ok(reference) => {
                progress.emit(ProgressEvent::done(Stage::Illustrate, Actor::System));
                Some(reference)
            }
            Err(error) => {
                // Mind maps are decoration; failure is logged and dropped.
                warn!("mindmap rendering failed: {error}");
                progress.emit(ProgressEvent::error(
                    Stage::Illustrate,
                    Actor::System,
                    error.to_string(),
                ));
                None
            }
        }
    }
}

/// Routing rule: exam-flavored requests skip deliberation.
fn routes_to_exam(query: &str) -> bool {
    query.to_lowercase().contains("exam")
}

/// Theory-flavored answers get a concept map when an illustrator is
/// configured.
fn wants_mindmap(query: &str) -> bool {
    let lowered = query.to_lowercase();
    ["theory", "concept", "explain"]
        .iter()
        .any(|keyword| lowered.contains(keyword))
}
