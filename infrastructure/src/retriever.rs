//! HTTP adapter for the external knowledge retriever.
//!
//! The retriever service owns the document store and embeddings; this
//! adapter just posts the query and hands the returned context to the
//! pipeline.

use async_trait::async_trait;
use council_application::{KnowledgeRetriever, RetrieveError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct RetrieveRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct RetrieveResponse {
    context: String,
}

pub struct HttpKnowledgeRetriever {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpKnowledgeRetriever {
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, RetrieveError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| RetrieveError::Backend(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl KnowledgeRetriever for HttpKnowledgeRetriever {
    async fn retrieve(&self, query: &str) -> Result<String, RetrieveError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RetrieveRequest { query })
            .send()
            .await
            .map_err(|e| RetrieveError::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrieveError::Backend(format!(
                "retriever returned {status}"
            )));
        }

        let parsed: RetrieveResponse = response
            .json()
            .await
            .map_err(|e| RetrieveError::Backend(e.to_string()))?;
        Ok(parsed.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_and_response_wire_shapes() {
        let request = serde_json::to_value(RetrieveRequest { query: "piles" }).unwrap();
        assert_eq!(request["query"], "piles");

        let parsed: RetrieveResponse =
            serde_json::from_str(r#"{"context": "Reference: EC7 clause 7.6"}"#).unwrap();
        assert_eq!(parsed.context, "Reference: EC7 clause 7.6");
    }
}
