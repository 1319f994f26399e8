//! Error types for the OpenAI-compatible adapter

use consult_application::GatewayError;
use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for OpenAI adapter operations
pub type Result<T> = std::result::Result<T, OpenAiError>;

/// Errors that can occur when talking to a chat-completions endpoint
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Response contained no choices")]
    NoChoices,

    #[error("First choice contained no text")]
    EmptyContent,
}

impl From<OpenAiError> for GatewayError {
    fn from(err: OpenAiError) -> Self {
        match err {
            OpenAiError::Transport(e) if e.is_timeout() => GatewayError::Timeout,
            OpenAiError::Transport(e) if e.is_connect() => {
                GatewayError::ConnectionError(e.to_string())
            }
            OpenAiError::Transport(e) => GatewayError::RequestFailed(e.to_string()),
            OpenAiError::SerializationError(e) => GatewayError::RequestFailed(e.to_string()),
            OpenAiError::Status { status, message } => match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    GatewayError::AuthenticationFailed(message)
                }
                StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited(message),
                StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(message),
                _ => GatewayError::RequestFailed(format!("HTTP {status}: {message}")),
            },
            OpenAiError::NoChoices | OpenAiError::EmptyContent => GatewayError::EmptyResponse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: StatusCode) -> GatewayError {
        OpenAiError::Status {
            status: code,
            message: "boom".to_string(),
        }
        .into()
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status(StatusCode::UNAUTHORIZED),
            GatewayError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            status(StatusCode::TOO_MANY_REQUESTS),
            GatewayError::RateLimited(_)
        ));
        assert!(matches!(
            status(StatusCode::NOT_FOUND),
            GatewayError::ModelNotAvailable(_)
        ));
        assert!(matches!(
            status(StatusCode::BAD_GATEWAY),
            GatewayError::RequestFailed(_)
        ));
    }

    #[test]
    fn test_empty_content_is_empty_response() {
        let err: GatewayError = OpenAiError::EmptyContent.into();
        assert!(matches!(err, GatewayError::EmptyResponse));
    }
}
