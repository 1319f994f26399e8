//! OpenAI-compatible chat-completions client (`/v1/chat/completions`).

use super::error::{OpenAiError, Result};
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ErrorEnvelope};
use async_trait::async_trait;
use consult_application::{CompletionClient, CompletionRequest, GatewayError};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, trace};

/// Connection settings for a chat-completions endpoint
#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    /// Base URL without the `/v1/...` path (e.g. `https://api.openai.com`)
    pub base_url: String,
    /// Bearer token; `None` for keyless local servers
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for OpenAiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
            timeout: Duration::from_secs(120),
        }
    }
}

/// [`CompletionClient`] for OpenAI and compatible servers.
///
/// Cheap to clone: `reqwest::Client` is reference-counted internally.
#[derive(Debug, Clone)]
pub struct OpenAiCompletionClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiCompletionClient {
    pub fn new(config: OpenAiClientConfig) -> std::result::Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: chat_completions_url(&config.base_url),
            api_key: config.api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &CompletionRequest) -> Result<String> {
        let payload = ChatCompletionRequest::from_request(request);

        debug!(
            model = %payload.model,
            temperature = payload.temperature,
            json_mode = payload.response_format.is_some(),
            messages = payload.messages.len(),
            "Sending completion request"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            trace!(payload = %serde_json::to_string_pretty(&payload)?, "Full request payload");
        }

        let mut req = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await.map_err(|e| {
            error!(url = %self.endpoint, error = %e, "Completion request failed (transport)");
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|env| env.error.message)
                .unwrap_or(body);
            error!(%status, %message, "Completion request returned HTTP error");
            return Err(OpenAiError::Status { status, message });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion usage"
            );
        }

        first_choice_text(parsed)
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> std::result::Result<String, GatewayError> {
        if request.messages.is_empty() {
            return Err(GatewayError::EmptyConversation);
        }
        Ok(self.send(request).await?)
    }
}

fn chat_completions_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/v1") {
        format!("{base}/chat/completions")
    } else {
        format!("{base}/v1/chat/completions")
    }
}

fn first_choice_text(response: ChatCompletionResponse) -> Result<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(OpenAiError::NoChoices)?;
    choice
        .message
        .content
        .filter(|text| !text.trim().is_empty())
        .ok_or(OpenAiError::EmptyContent)
}
