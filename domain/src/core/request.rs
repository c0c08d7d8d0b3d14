//! Request value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// One incoming question, created once per request and immutable.
///
/// The optional context is free text supplied by the caller (for example
/// notes from an ongoing study project) and is distinct from the context
/// the knowledge retriever produces later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    query: String,
    context: Option<String>,
}

impl Request {
    /// Create a request, rejecting blank queries.
    pub fn try_new(
        query: impl Into<String>,
        context: Option<String>,
    ) -> Result<Self, DomainError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(DomainError::InvalidRequest(
                "query cannot be empty".to_string(),
            ));
        }
        Ok(Self { query, context })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// The query as presented to downstream agents: caller-supplied
    /// context, when present, is prepended so every agent sees it.
    pub fn composed_query(&self) -> String {
        match &self.context {
            Some(context) => format!("Context: {}\n\nQuestion: {}", context, self.query),
            None => self.query.clone(),
        }
    }
}
