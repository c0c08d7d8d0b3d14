//! Ports: the interfaces this core consumes from external collaborators.
//!
//! Implementations (adapters) live in the infrastructure layer, or in
//! tests as scripted fakes.

pub mod critic;
pub mod exam;
pub mod illustrator;
pub mod llm_gateway;
pub mod progress;
pub mod retriever;

use thiserror::Error;

/// Error from a non-gateway collaborator (critic, exam drafter,
/// illustrator). Collaborators are opaque; their failures carry text.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct CollaboratorError(pub String);

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
