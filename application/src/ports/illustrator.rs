//! Illustrator port
//!
//! Optional collaborator that renders a concept map for theory-flavored
//! answers. Rendering is entirely external; this core only receives a
//! reference (a path or URL) to attach to the outcome.

use super::CollaboratorError;
use async_trait::async_trait;

#[async_trait]
pub trait Illustrator: Send + Sync {
    /// Render a mind map for the answer and return a reference to it.
    async fn mindmap(&self, query: &str, answer: &str) -> Result<String, CollaboratorError>;
}
