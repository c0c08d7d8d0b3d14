//! Result types for a completed deliberation and a completed request.

use crate::deliberation::draft::Draft;
use crate::deliberation::label::Label;
use crate::deliberation::ranking::Ranking;
use serde::Serialize;

/// Everything a deliberation run produced: the synthesized answer plus
/// the full record of drafts and rankings behind it.
#[derive(Debug, Clone, Serialize)]
pub struct DeliberationOutcome {
    /// The chair's synthesized answer, or the no-consensus notice.
    pub answer: String,
    /// Winning label, absent when no draft survived.
    pub winner: Option<Label>,
    /// False only when every draft errored and synthesis was skipped.
    pub consensus_reached: bool,
    /// One draft per roster participant, success or error.
    pub drafts: Vec<Draft>,
    /// One ranking per reviewer whose call succeeded.
    pub rankings: Vec<Ranking>,
}

impl DeliberationOutcome {
    pub fn synthesized(
        answer: impl Into<String>,
        winner: Label,
        drafts: Vec<Draft>,
        rankings: Vec<Ranking>,
    ) -> Self {
        Self {
            answer: answer.into(),
            winner: Some(winner),
            consensus_reached: true,
            drafts,
            rankings,
        }
    }

    /// The outcome when every generation call failed: review and
    /// synthesis are skipped and no model is consulted again.
    pub fn no_consensus(drafts: Vec<Draft>) -> Self {
        Self {
            answer: "No consensus reached: every council member failed to produce a draft."
                .to_string(),
            winner: None,
            consensus_reached: false,
            drafts,
            rankings: Vec::new(),
        }
    }

    pub fn surviving_drafts(&self) -> impl Iterator<Item = &Draft> {
        self.drafts.iter().filter(|d| d.survived())
    }
}

/// The structured boundary response for one request. Never an `Err`:
/// failures are data (`success == false`), so the serving process keeps
/// running whatever happened inside the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct RequestOutcome {
    pub answer: String,
    pub critique: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mindmap: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RequestOutcome {
    /// A deliberated answer with its critique.
    pub fn completed(answer: impl Into<String>, critique: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            critique: critique.into(),
            mindmap: None,
            success: true,
            error: None,
        }
    }

    /// An exam paper; the exam path terminates without critique.
    pub fn exam(paper: impl Into<String>) -> Self {
        Self {
            answer: paper.into(),
            critique: String::new(),
            mindmap: None,
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            answer: String::new(),
            critique: String::new(),
            mindmap: None,
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn with_mindmap(mut self, mindmap: Option<String>) -> Self {
        self.mindmap = mindmap;
        self
    }
}
