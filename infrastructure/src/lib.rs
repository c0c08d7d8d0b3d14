//! Infrastructure layer for council
//!
//! Adapters behind the application ports: HTTP gateways to the external
//! generation services, the HTTP knowledge retriever, LLM-backed critic
//! and exam council, configuration loading, and the JSONL deliberation
//! transcript.

pub mod agents;
pub mod config;
pub mod logging;
pub mod providers;
pub mod retriever;

pub use agents::{critic::LlmCritic, exam::ExamCouncil};
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use logging::transcript::JsonlTranscript;
pub use providers::HttpLlmGateway;
pub use retriever::HttpKnowledgeRetriever;
