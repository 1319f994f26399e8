//! Consultation parameters: generation settings shared by every stage.

use crate::ports::completion_client::GenerationOptions;
use consult_domain::{Model, Stage};

/// Sampling temperature used unless configured otherwise.
///
/// Deliberately high so each run invents a different patient.
pub const DEFAULT_TEMPERATURE: f32 = 1.2;

/// Static parameters for [`RunConsultationUseCase`](crate::use_cases::run_consultation::RunConsultationUseCase).
#[derive(Debug, Clone, PartialEq)]
pub struct ConsultationParams {
    /// Model used for every completion stage.
    pub model: Model,
    /// Sampling temperature for every completion stage.
    pub temperature: f32,
    /// Reject pharmacist output lacking the four advice fields.
    pub validate_medication_schema: bool,
}

impl Default for ConsultationParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: DEFAULT_TEMPERATURE,
            validate_medication_schema: false,
        }
    }
}

impl ConsultationParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_medication_schema_check(mut self, enabled: bool) -> Self {
        self.validate_medication_schema = enabled;
        self
    }

    /// Generation options for a stage; JSON mode only where the stage expects it.
    pub fn options_for(&self, stage: Stage) -> GenerationOptions {
        GenerationOptions::new(self.model.clone(), self.temperature)
            .with_json_mode(stage.expects_structured_output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = ConsultationParams::default();
        assert_eq!(params.model, Model::Gpt4TurboPreview);
        assert!((params.temperature - 1.2).abs() < f32::EPSILON);
        assert!(!params.validate_medication_schema);
    }

    #[test]
    fn test_options_for_prescribe_use_json_mode() {
        let params = ConsultationParams::default().with_temperature(0.7);
        let options = params.options_for(Stage::Prescribe);
        assert!(options.json_mode);
        assert!((options.temperature - 0.7).abs() < f32::EPSILON);
        assert!(!params.options_for(Stage::Diagnose).json_mode);
    }
}
