//! Domain layer for council
//!
//! This crate contains the core business logic of the deliberation engine.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council Deliberation
//!
//! A fixed roster of external generation services answers a question in
//! three stages:
//!
//! - **Generate**: every member drafts an independent answer
//! - **Rank**: members anonymously rank each other's drafts
//! - **Synthesize**: a designated chair rewrites the winning draft into
//!   the final answer
//!
//! The anonymization (labels), rank extraction, and score tallying in
//! this crate are pure functions. All I/O lives behind application ports.

pub mod calc;
pub mod core;
pub mod deliberation;
pub mod outcome;
pub mod progress;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use crate::core::{
    error::DomainError,
    participant::{Credential, Participant, ParticipantId, Provider, Roster},
    request::Request,
};
pub use deliberation::{
    draft::{Draft, DraftBody},
    extract::extract_ranking,
    label::{Label, LabelMap},
    ranking::Ranking,
    tally::ScoreTable,
};
pub use outcome::{DeliberationOutcome, RequestOutcome};
pub use progress::{Actor, EventStatus, ProgressEvent, Stage};
pub use prompt::PromptTemplate;
