//! Application layer for council
//!
//! Ports (interfaces toward external collaborators) and use cases (the
//! deliberation coordinator and the request pipeline). Adapters for the
//! ports live in the infrastructure layer; this crate owns the protocol.

pub mod ports;
pub mod use_cases;

pub use ports::{
    critic::Critic,
    exam::ExamDrafter,
    illustrator::Illustrator,
    llm_gateway::{GatewayError, LlmGateway},
    progress::{
        ChannelSink, CompositeSink, NoProgress, ProgressSink, ProgressStream, RequestEvent,
        progress_channel,
    },
    retriever::{KnowledgeRetriever, NoRetriever, RetrieveError},
    CollaboratorError,
};
pub use use_cases::{
    deliberate::{DeliberateUseCase, DeliberationError},
    handle_request::RequestPipeline,
};
