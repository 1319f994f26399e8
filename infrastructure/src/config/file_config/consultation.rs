//! Consultation configuration from TOML (`[consultation]` section)

use consult_application::{ConsultationParams, DEFAULT_TEMPERATURE};
use consult_domain::{ConfigIssue, ConfigIssueCode, Model, Severity};
use serde::{Deserialize, Serialize};

/// Raw consultation settings
///
/// # Example
///
/// ```toml
/// [consultation]
/// model = "gpt-4o"
/// temperature = 1.2
/// validate_medication_schema = true
/// record_path = "cases/last_case_log.json"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsultationConfig {
    /// Model used for every completion stage
    pub model: String,
    /// Sampling temperature for every completion stage
    pub temperature: f32,
    /// Reject pharmacist output lacking the four advice fields
    pub validate_medication_schema: bool,
    /// Where the finished case record is written
    pub record_path: String,
}

impl Default for FileConsultationConfig {
    fn default() -> Self {
        Self {
            model: Model::default().to_string(),
            temperature: DEFAULT_TEMPERATURE,
            validate_medication_schema: false,
            record_path: crate::persistence::DEFAULT_RECORD_FILE.to_string(),
        }
    }
}

impl FileConsultationConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.model.trim().is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::EmptyModelName {
                    field: "consultation.model".to_string(),
                },
                message: "consultation.model: model name cannot be empty".to_string(),
            });
        }

        let Ok(model) = self.model.trim().parse::<Model>();
        if !self.model.trim().is_empty() && !model.supports_json_mode() {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::JsonModeUnverified {
                    model: model.to_string(),
                },
                message: format!(
                    "consultation.model: '{}' is not known to support JSON mode; \
                     the pharmacist stage may fail",
                    model
                ),
            });
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::TemperatureOutOfRange {
                    value: self.temperature,
                },
                message: format!(
                    "consultation.temperature: {} is outside 0.0..=2.0",
                    self.temperature
                ),
            });
        }

        issues
    }

    pub fn to_params(&self) -> ConsultationParams {
        let Ok(model) = self.model.trim().parse::<Model>();
        ConsultationParams::default()
            .with_model(model)
            .with_temperature(self.temperature)
            .with_medication_schema_check(self.validate_medication_schema)
    }
}
