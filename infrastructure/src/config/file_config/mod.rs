//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod consultation;
mod logging;
mod memory;
mod output;
mod providers;

pub use consultation::FileConsultationConfig;
pub use logging::FileLoggingConfig;
pub use memory::FileMemoryConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{FileOpenAiConfig, FileProvidersConfig};

use consult_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model and sampling settings
    pub consultation: FileConsultationConfig,
    /// Case memory settings
    pub memory: FileMemoryConfig,
    /// Completion provider settings
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript and diagnostic log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.consultation.validate();
        issues.extend(self.memory.validate());
        issues
    }
}
