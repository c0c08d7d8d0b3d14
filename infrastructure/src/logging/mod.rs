//! Structured logging adapters.

pub mod transcript;
