//! Prompt construction for every outbound call the engine makes.

pub mod template;

pub use template::PromptTemplate;
