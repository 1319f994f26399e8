//! Offline fact validator.
//!
//! Stands in for a literature lookup: it always reports the input as
//! coherent, quoting a bounded excerpt of it.

use async_trait::async_trait;
use consult_application::{FactValidationError, FactValidator};
use consult_domain::util::truncate_chars;

/// Characters of the input quoted in the statement.
pub const DEFAULT_EXCERPT_CHARS: usize = 500;

/// [`FactValidator`] that answers with a fixed coherence statement
#[derive(Debug, Clone)]
pub struct TemplateFactValidator {
    excerpt_chars: usize,
}

impl TemplateFactValidator {
    pub fn new() -> Self {
        Self {
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }

    pub fn with_excerpt_chars(mut self, excerpt_chars: usize) -> Self {
        self.excerpt_chars = excerpt_chars;
        self
    }

    pub fn statement(&self, text: &str) -> String {
        format!(
            "Validated: The information '{}...' is coherent with established medical literature.",
            truncate_chars(text, self.excerpt_chars)
        )
    }
}

impl Default for TemplateFactValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FactValidator for TemplateFactValidator {
    async fn validate(&self, text: &str) -> Result<String, FactValidationError> {
        Ok(self.statement(text))
    }
}
