//! Case memory configuration from TOML (`[memory]` section)

use consult_domain::{CaseMemory, ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Raw memory settings
///
/// # Example
///
/// ```toml
/// [memory]
/// capacity = 100
/// seed = ["Patient reports persistent cough and mild fever"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMemoryConfig {
    /// Maximum remembered narratives; unbounded when absent
    pub capacity: Option<usize>,
    /// Narratives loaded before the first consultation
    pub seed: Vec<String>,
}

impl FileMemoryConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.capacity == Some(0) {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::ZeroMemoryCapacity,
                message: "memory.capacity = 0: only the latest case will be kept".to_string(),
            });
        }
        issues
    }

    /// Build the memory, seeded in listed order.
    pub fn build_memory(&self) -> CaseMemory {
        let mut memory = match self.capacity {
            Some(limit) => CaseMemory::with_capacity_limit(limit),
            None => CaseMemory::new(),
        };
        memory.extend(self.seed.iter().cloned());
        memory
    }
}
