//! Progress events emitted by background deliberation work.
//!
//! Events are append-only and strictly ordered per actor within a stage:
//! a `Started` always precedes the matching `Done` or `Error`. Events
//! for different actors may interleave in completion order.

use crate::core::participant::ParticipantId;
use serde::Serialize;

/// Pipeline stage an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Retrieve,
    Generate,
    Rank,
    Synthesize,
    Critique,
    DraftExam,
    Illustrate,
}

impl Stage {
    pub fn as_str(&self) -> &str {
        match self {
            Stage::Retrieve => "retrieve",
            Stage::Generate => "generate",
            Stage::Rank => "rank",
            Stage::Synthesize => "synthesize",
            Stage::Critique => "critique",
            Stage::DraftExam => "draft_exam",
            Stage::Illustrate => "illustrate",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Stage::Retrieve => "Retrieval",
            Stage::Generate => "Drafting",
            Stage::Rank => "Peer Review",
            Stage::Synthesize => "Synthesis",
            Stage::Critique => "Critique",
            Stage::DraftExam => "Exam Drafting",
            Stage::Illustrate => "Illustration",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Who an event is about: one participant, or the coordinator itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    Participant(ParticipantId),
    System,
}

impl Actor {
    pub fn name(&self) -> &str {
        match self {
            Actor::Participant(id) => id.as_str(),
            Actor::System => "system",
        }
    }
}

/// Lifecycle status of one unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Started,
    Done,
    Error,
}

impl EventStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EventStatus::Started => "started",
            EventStatus::Done => "done",
            EventStatus::Error => "error",
        }
    }
}

/// One unit of status communicated from background work to a caller.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressEvent {
    pub stage: Stage,
    pub actor: Actor,
    pub status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProgressEvent {
    pub fn started(stage: Stage, actor: Actor) -> Self {
        Self {
            stage,
            actor,
            status: EventStatus::Started,
            detail: None,
        }
    }

    pub fn done(stage: Stage, actor: Actor) -> Self {
        Self {
            stage,
            actor,
            status: EventStatus::Done,
            detail: None,
        }
    }

    pub fn error(stage: Stage, actor: Actor, detail: impl Into<String>) -> Self {
        Self {
            stage,
            actor,
            status: EventStatus::Error,
            detail: Some(detail.into()),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
