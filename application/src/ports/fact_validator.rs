//! Fact validation port

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FactValidationError {
    #[error("Knowledge source unavailable: {0}")]
    Unavailable(String),

    #[error("Validation failed: {0}")]
    Failed(String),
}

/// Checks a diagnosis and medication text for coherence.
///
/// The consultation treats the result as opaque text.
#[async_trait]
pub trait FactValidator: Send + Sync {
    async fn validate(&self, text: &str) -> Result<String, FactValidationError>;
}
