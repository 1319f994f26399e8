//! Infrastructure layer for consult-sim
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod knowledge;
pub mod logging;
pub mod openai;
pub mod persistence;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileConsultationConfig, FileLoggingConfig, FileMemoryConfig,
    FileOpenAiConfig, FileOutputConfig, FileOutputFormat, FileProvidersConfig,
};
pub use knowledge::TemplateFactValidator;
pub use logging::JsonlConversationLogger;
pub use openai::{OpenAiClientConfig, OpenAiCompletionClient, OpenAiError};
pub use persistence::{DEFAULT_RECORD_FILE, JsonFileCaseSink};
