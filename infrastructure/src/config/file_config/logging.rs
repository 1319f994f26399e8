//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of every request and response
    pub conversation_log: Option<String>,
    /// Directory for daily-rolling diagnostic logs
    pub log_dir: Option<String>,
}
