//! LLM Gateway port
//!
//! Defines the interface for sending a prompt to a model capability.

use async_trait::async_trait;
use quizquorum_domain::{FailureKind, GenerationRequest, Model, ModelReply};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Non-success HTTP status from the provider
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Stable classification of this error
    pub fn kind(&self) -> FailureKind {
        match self {
            GatewayError::Http { status, message } => FailureKind::from_status(*status)
                .unwrap_or_else(|| FailureKind::classify(message)),
            GatewayError::Connection(_) => FailureKind::Network,
            GatewayError::Timeout => FailureKind::Timeout,
            GatewayError::InvalidResponse(_) => FailureKind::EmptyResponse,
            GatewayError::Other(message) => FailureKind::classify(message),
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer reaches a model capability.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one prompt to `model` and return its reply
    async fn generate(
        &self,
        model: &Model,
        request: &GenerationRequest,
    ) -> Result<ModelReply, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_takes_precedence() {
        let err = GatewayError::Http {
            status: 429,
            message: "model overloaded".to_string(),
        };
        assert_eq!(err.kind(), FailureKind::RateLimited);
    }

    #[test]
    fn test_message_classification_for_unmapped_status() {
        let err = GatewayError::Http {
            status: 500,
            message: "The model is overloaded. Please try again later.".to_string(),
        };
        assert_eq!(err.kind(), FailureKind::Overloaded);

        let err = GatewayError::Http {
            status: 500,
            message: "Internal error".to_string(),
        };
        assert_eq!(err.kind(), FailureKind::Unknown);
    }

    #[test]
    fn test_transport_errors() {
        assert_eq!(GatewayError::Timeout.kind(), FailureKind::Timeout);
        assert_eq!(
            GatewayError::Connection("refused".to_string()).kind(),
            FailureKind::Network
        );
        assert_eq!(
            GatewayError::InvalidResponse("expected value".to_string()).kind(),
            FailureKind::EmptyResponse
        );
    }
}
