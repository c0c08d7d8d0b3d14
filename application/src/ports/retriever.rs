//! Knowledge Retriever port
//!
//! The retriever owns the knowledge base (documents, embeddings); this
//! core only asks it for context text relevant to a query.

use async_trait::async_trait;
use thiserror::Error;

/// Context returned when retrieval finds nothing, or when no retriever
/// is configured at all.
pub const NO_RESULTS_CONTEXT: &str = "No relevant material found in the knowledge base.";

#[derive(Error, Debug)]
pub enum RetrieveError {
    #[error("retrieval backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait KnowledgeRetriever: Send + Sync {
    /// Return context text for the query, possibly the no-results notice.
    async fn retrieve(&self, query: &str) -> Result<String, RetrieveError>;
}

/// Retriever used when no knowledge base is configured: every query
/// yields the no-results notice.
pub struct NoRetriever;

#[async_trait]
impl KnowledgeRetriever for NoRetriever {
    async fn retrieve(&self, _query: &str) -> Result<String, RetrieveError> {
        Ok(NO_RESULTS_CONTEXT.to_string())
    }
}
