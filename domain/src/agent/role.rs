//! Agent roles and their system instructions.
//!
//! [`AgentRole`] is the role registry: a closed set of six personas, each
//! carrying a fixed instruction. Lookups through the enum are total; only the
//! string-keyed entry point ([`AgentRole::from_str`]) can fail, with
//! [`DomainError::UnknownRole`].

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A persona taking part in the consultation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    /// Describes symptoms to the doctor
    Patient,
    /// Diagnoses the presented symptoms
    Doctor,
    /// Recommends medication as a JSON object
    Pharmacist,
    /// Checks facts against the literature
    Knowledge,
    /// Cross-checks the whole consultation
    Validator,
    /// Gives a one-line verdict on the advice
    Feedback,
}

impl AgentRole {
    /// All roles in registry order
    pub const ALL: [AgentRole; 6] = [
        AgentRole::Patient,
        AgentRole::Doctor,
        AgentRole::Pharmacist,
        AgentRole::Knowledge,
        AgentRole::Validator,
        AgentRole::Feedback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Patient => "patient",
            AgentRole::Doctor => "doctor",
            AgentRole::Pharmacist => "pharmacist",
            AgentRole::Knowledge => "knowledge",
            AgentRole::Validator => "validator",
            AgentRole::Feedback => "feedback",
        }
    }

    /// System-level instruction for this persona
    pub fn instruction(&self) -> &'static str {
        match self {
            AgentRole::Patient => "You are a patient describing symptoms to a doctor.",
            AgentRole::Doctor => {
                "You are an expert doctor. Diagnose symptoms, optionally suggest tests."
            }
            AgentRole::Pharmacist => {
                "You are a clinical pharmacist. Recommend suitable medications and check for \
                 interactions. Respond ONLY in valid JSON format."
            }
            AgentRole::Knowledge => "You are a medical literature search assistant.",
            AgentRole::Validator => {
                "You are a final validator. Cross-check diagnosis, treatment, and validation."
            }
            AgentRole::Feedback => {
                "You are a patient providing simple feedback on whether the advice worked or \
                 needs improvement."
            }
        }
    }

    /// Look up an instruction by role name
    pub fn instruction_for_name(name: &str) -> Result<&'static str, DomainError> {
        name.parse::<AgentRole>().map(|role| role.instruction())
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AgentRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "patient" => Ok(AgentRole::Patient),
            "doctor" => Ok(AgentRole::Doctor),
            "pharmacist" => Ok(AgentRole::Pharmacist),
            "knowledge" => Ok(AgentRole::Knowledge),
            "validator" => Ok(AgentRole::Validator),
            "feedback" => Ok(AgentRole::Feedback),
            _ => Err(DomainError::UnknownRole(s.to_string())),
        }
    }
}
