//! Consultation pipeline stages

use serde::{Deserialize, Serialize};

/// One step of the consultation state machine.
///
/// Stages run in declaration order with no branching; [`Stage::next`]
/// gives the only permitted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    GeneratePatientSymptom,
    Recall,
    Diagnose,
    Prescribe,
    Validate,
    FinalReview,
    Feedback,
    Finalize,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::GeneratePatientSymptom,
        Stage::Recall,
        Stage::Diagnose,
        Stage::Prescribe,
        Stage::Validate,
        Stage::FinalReview,
        Stage::Feedback,
        Stage::Finalize,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::GeneratePatientSymptom => "generate_patient_symptom",
            Stage::Recall => "recall",
            Stage::Diagnose => "diagnose",
            Stage::Prescribe => "prescribe",
            Stage::Validate => "validate",
            Stage::FinalReview => "final_review",
            Stage::Feedback => "feedback",
            Stage::Finalize => "finalize",
        }
    }

    /// Transcript label for stages that produce a visible turn
    pub fn transcript_label(&self) -> Option<&'static str> {
        match self {
            Stage::GeneratePatientSymptom => Some("Patient"),
            Stage::Diagnose => Some("Doctor's Diagnosis"),
            Stage::Prescribe => Some("Pharmacist Recommendation"),
            Stage::Validate => Some("Knowledge Agent Validation"),
            Stage::FinalReview => Some("Final Validator Summary"),
            Stage::Feedback => Some("Simulated Patient Feedback"),
            Stage::Recall | Stage::Finalize => None,
        }
    }

    /// Whether the stage requests structured (JSON object) output
    pub fn expects_structured_output(&self) -> bool {
        matches!(self, Stage::Prescribe)
    }

    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::GeneratePatientSymptom => Some(Stage::Recall),
            Stage::Recall => Some(Stage::Diagnose),
            Stage::Diagnose => Some(Stage::Prescribe),
            Stage::Prescribe => Some(Stage::Validate),
            Stage::Validate => Some(Stage::FinalReview),
            Stage::FinalReview => Some(Stage::Feedback),
            Stage::Feedback => Some(Stage::Finalize),
            Stage::Finalize => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
