//! Knowledge retrieval configuration (`[retrieval]` section).

use serde::{Deserialize, Serialize};

fn default_timeout_secs() -> u64 {
    30
}

/// Where the external knowledge retriever lives. With no endpoint the
/// engine runs without retrieval and every request sees the no-results
/// context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSection {
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RetrievalSection {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}
