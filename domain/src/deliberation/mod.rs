//! Deliberation domain
//!
//! Core concepts for the three-stage council protocol:
//!
//! - **Generate**: every member drafts independently ([`draft`])
//! - **Rank**: drafts are anonymized under labels ([`label`]) and each
//!   member's free-text verdict is parsed into an ordered preference
//!   ([`extract`], [`ranking`])
//! - **Synthesize**: rankings are tallied into a winner ([`tally`])
//!
//! Everything here is pure: the coordinator in the application layer owns
//! the concurrency and the outbound calls.

pub mod draft;
pub mod extract;
pub mod label;
pub mod ranking;
pub mod tally;

pub use draft::{Draft, DraftBody};
pub use extract::extract_ranking;
pub use label::{Label, LabelMap};
pub use ranking::Ranking;
pub use tally::ScoreTable;
