//! Domain layer for consult-sim
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Consultation
//!
//! A consultation is a fixed, linear sequence of agent turns:
//!
//! - **Patient** invents a symptom, which is stored in [`CaseMemory`]
//! - **Doctor** diagnoses it, with the memory recall as context
//! - **Pharmacist** answers with a JSON medication recommendation
//! - **Knowledge** validates the diagnosis and medication
//! - **Validator** summarizes, **Feedback** gives a one-line verdict
//!
//! The outputs are collected into a [`CaseRecord`].

pub mod agent;
pub mod config;
pub mod consultation;
pub mod core;
pub mod memory;
pub mod prompt;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use agent::role::AgentRole;
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use consultation::{
    medication::MedicationAdvice,
    record::{CaseRecord, CaseRecordBuilder},
    stage::Stage,
};
pub use core::{error::DomainError, model::Model};
pub use memory::{CaseMemory, NO_SIMILAR_CASE};
pub use prompt::PromptTemplate;
pub use session::entities::{Message, Role};
