//! Pharmacist output schema.
//!
//! The completion service only promises that structured output parses as an
//! object. [`MedicationAdvice::parse`] is the optional stricter check that the
//! object carries the four fields the pharmacist is instructed to produce.

use serde::{Deserialize, Serialize};

/// Medication recommendation as requested from the pharmacist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationAdvice {
    pub medication: String,
    pub dosage: String,
    pub interactions: String,
    pub advice: String,
}

impl MedicationAdvice {
    /// Parse pharmacist output, requiring all four string fields.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw.trim())
    }
}
