//! OpenAI-compatible completion adapter

pub mod client;
pub mod error;
mod types;

pub use client::{OpenAiClientConfig, OpenAiCompletionClient};
pub use error::OpenAiError;
