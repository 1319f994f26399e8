//! Provider configuration from TOML (`[providers]` section)

use crate::openai::OpenAiClientConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key; takes precedence over the environment variable.
    pub api_key: Option<String>,
    /// Base URL for the API (can point at a compatible local server).
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            timeout_seconds: 120,
        }
    }
}

impl FileOpenAiConfig {
    /// Direct key first, then the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn to_client_config(&self) -> OpenAiClientConfig {
        OpenAiClientConfig {
            base_url: self.base_url.clone(),
            api_key: self.resolve_api_key(),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// OpenAI-compatible API settings.
    pub openai: FileOpenAiConfig,
}
