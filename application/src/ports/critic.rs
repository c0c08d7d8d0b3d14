//! Critic port
//!
//! An external reviewer that checks the finished answer for physical
//! plausibility and compliance before it reaches the caller.

use super::CollaboratorError;
use async_trait::async_trait;

#[async_trait]
pub trait Critic: Send + Sync {
    /// Review the final answer against the original query and the plan
    /// label describing how it was produced. Returns the verdict text.
    async fn review(
        &self,
        query: &str,
        plan: &str,
        answer: &str,
    ) -> Result<String, CollaboratorError>;
}
