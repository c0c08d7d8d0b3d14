//! Exam Drafter port
//!
//! Requests routed to the exam path bypass deliberation entirely and
//! delegate to this collaborator.

use super::CollaboratorError;
use async_trait::async_trait;

#[async_trait]
pub trait ExamDrafter: Send + Sync {
    /// Produce a complete exam paper for the request.
    async fn draft(&self, query: &str, context: &str) -> Result<String, CollaboratorError>;
}
