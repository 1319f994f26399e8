//! Completion client port
//!
//! Defines the request/response contract the consultation relies on when
//! talking to a text-completion service.

use async_trait::async_trait;
use consult_domain::{Message, Model};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while requesting a completion
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Conversation is empty")]
    EmptyConversation,

    #[error("Completion contained no text")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A function the model may ask to call.
///
/// Representable for completeness; the consultation stages never declare one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments object
    pub parameters: serde_json::Value,
}

/// How the model should treat declared functions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionCallMode {
    Auto,
    None,
    Named(String),
}

/// Generation settings sent alongside a conversation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub model: Model,
    pub temperature: f32,
    /// Always false in this pipeline
    pub stream: bool,
    /// Ask the service for a well-formed JSON object
    pub json_mode: bool,
    pub functions: Vec<FunctionDeclaration>,
    /// Only meaningful when `functions` is non-empty
    pub function_call: Option<FunctionCallMode>,
}

impl GenerationOptions {
    pub fn new(model: Model, temperature: f32) -> Self {
        Self {
            model,
            temperature,
            stream: false,
            json_mode: false,
            functions: Vec::new(),
            function_call: None,
        }
    }

    pub fn with_json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = enabled;
        self
    }

    pub fn with_functions(
        mut self,
        functions: Vec<FunctionDeclaration>,
        function_call: Option<FunctionCallMode>,
    ) -> Self {
        self.functions = functions;
        self.function_call = function_call;
        self
    }
}

/// An ordered conversation plus generation options
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub options: GenerationOptions,
}

impl CompletionRequest {
    pub fn new(messages: Vec<Message>, options: GenerationOptions) -> Self {
        Self { messages, options }
    }
}

/// Client for a text-completion service
///
/// Implementations (adapters) live in the infrastructure layer. A call returns
/// the first candidate's text; failures are not retried.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
