//! Chat-completions wire types.
//!
//! Private to the adapter; the application layer only sees
//! [`CompletionRequest`] and plain text.

use consult_application::{CompletionRequest, FunctionCallMode, FunctionDeclaration};
use consult_domain::Message;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub temperature: f32,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "no_functions")]
    pub functions: &'a [FunctionDeclaration],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<serde_json::Value>,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn from_request(request: &'a CompletionRequest) -> Self {
        let options = &request.options;
        let function_call = if options.functions.is_empty() {
            None
        } else {
            options.function_call.as_ref().map(|mode| match mode {
                FunctionCallMode::Auto => serde_json::json!("auto"),
                FunctionCallMode::None => serde_json::json!("none"),
                FunctionCallMode::Named(name) => serde_json::json!({ "name": name }),
            })
        };

        Self {
            model: options.model.as_str(),
            messages: &request.messages,
            temperature: options.temperature,
            stream: options.stream,
            response_format: options.json_mode.then(ResponseFormat::json_object),
            functions: &options.functions,
            function_call,
        }
    }
}

fn no_functions(functions: &&[FunctionDeclaration]) -> bool {
    functions.is_empty()
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl ResponseFormat {
    fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

/// Error envelope used by OpenAI and compatible APIs.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
