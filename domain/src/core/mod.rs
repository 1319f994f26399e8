//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: completion models the consultation can run on
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
