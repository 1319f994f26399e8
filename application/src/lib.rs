//! Application layer for consult-sim
//!
//! This crate contains the consultation use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConsultationParams, DEFAULT_TEMPERATURE};
pub use ports::{
    case_record_sink::{CaseRecordSink, PersistenceError},
    completion_client::{
        CompletionClient, CompletionRequest, FunctionCallMode, FunctionDeclaration,
        GatewayError, GenerationOptions,
    },
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    fact_validator::{FactValidationError, FactValidator},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::run_consultation::{RunConsultationError, RunConsultationUseCase};
