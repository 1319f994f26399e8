//! Structured configuration issues.
//!
//! Config loaders collect every problem they find instead of stopping at the
//! first one; callers decide what to do based on [`Severity`].

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssueCode {
    /// A model field was set to an empty string.
    EmptyModelName { field: String },
    /// Sampling temperature outside the service's accepted range.
    TemperatureOutOfRange { value: f32 },
    /// `memory.capacity = 0` would forget every case immediately.
    ZeroMemoryCapacity,
    /// The model is not known to accept `response_format = json_object`.
    JsonModeUnverified { model: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
