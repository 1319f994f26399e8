//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown agent role: {0}")]
    UnknownRole(String),

    #[error("Case record is missing field: {0}")]
    IncompleteRecord(&'static str),
}
