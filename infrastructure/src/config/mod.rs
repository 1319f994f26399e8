//! Configuration file loading for consult-sim
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./consult.toml` or `./.consult.toml`
//! 3. Global: `~/.config/consult-sim/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileConsultationConfig, FileLoggingConfig, FileMemoryConfig, FileOpenAiConfig,
    FileOutputConfig, FileOutputFormat, FileProvidersConfig,
};
pub use loader::ConfigLoader;
