//! Consultation domain.
//!
//! - [`stage::Stage`]: the ordered pipeline states
//! - [`record::CaseRecord`]: the six-field terminal artifact
//! - [`medication::MedicationAdvice`]: the pharmacist's JSON shape

pub mod medication;
pub mod record;
pub mod stage;
