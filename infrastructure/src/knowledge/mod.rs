//! Fact validation adapters

pub mod template_validator;

pub use template_validator::{DEFAULT_EXCERPT_CHARS, TemplateFactValidator};
