//! The case record produced by a full consultation

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Six-field snapshot of one consultation (Value Object)
///
/// Field values are the stage outputs, stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub symptoms: String,
    pub diagnosis: String,
    pub medication: String,
    pub validation: String,
    pub summary: String,
    pub feedback: String,
}

impl CaseRecord {
    /// Field names in persisted order
    pub const FIELDS: [&'static str; 6] = [
        "symptoms",
        "diagnosis",
        "medication",
        "validation",
        "summary",
        "feedback",
    ];

    pub fn builder() -> CaseRecordBuilder {
        CaseRecordBuilder::default()
    }
}

/// Collects stage outputs until the record is complete.
#[derive(Debug, Clone, Default)]
pub struct CaseRecordBuilder {
    symptoms: Option<String>,
    diagnosis: Option<String>,
    medication: Option<String>,
    validation: Option<String>,
    summary: Option<String>,
    feedback: Option<String>,
}

impl CaseRecordBuilder {
    pub fn symptoms(mut self, value: impl Into<String>) -> Self {
        self.symptoms = Some(value.into());
        self
    }

    pub fn diagnosis(mut self, value: impl Into<String>) -> Self {
        self.diagnosis = Some(value.into());
        self
    }

    pub fn medication(mut self, value: impl Into<String>) -> Self {
        self.medication = Some(value.into());
        self
    }

    pub fn validation(mut self, value: impl Into<String>) -> Self {
        self.validation = Some(value.into());
        self
    }

    pub fn summary(mut self, value: impl Into<String>) -> Self {
        self.summary = Some(value.into());
        self
    }

    pub fn feedback(mut self, value: impl Into<String>) -> Self {
        self.feedback = Some(value.into());
        self
    }

    /// Assemble the record. Fails on the first absent field.
    pub fn build(self) -> Result<CaseRecord, DomainError> {
        Ok(CaseRecord {
            symptoms: self.symptoms.ok_or(DomainError::IncompleteRecord("symptoms"))?,
            diagnosis: self
                .diagnosis
                .ok_or(DomainError::IncompleteRecord("diagnosis"))?,
            medication: self
                .medication
                .ok_or(DomainError::IncompleteRecord("medication"))?,
            validation: self
                .validation
                .ok_or(DomainError::IncompleteRecord("validation"))?,
            summary: self.summary.ok_or(DomainError::IncompleteRecord("summary"))?,
            feedback: self.feedback.ok_or(DomainError::IncompleteRecord("feedback"))?,
        })
    }
}
