//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod case_record_sink;
pub mod completion_client;
pub mod conversation_logger;
pub mod fact_validator;
pub mod progress;
