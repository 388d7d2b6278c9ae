//! Gemini gateway
//!
//! Implements `LlmGateway` over the `generateContent` REST endpoint.

use super::types::{ErrorEnvelope, GenerateContentRequest, WireReply};
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use quizquorum_application::ports::llm_gateway::{GatewayError, LlmGateway};
use quizquorum_domain::core::string::preview;
use quizquorum_domain::{GenerationRequest, Model, ModelReply};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// HTTP adapter for Gemini models
pub struct GeminiGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiGateway {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, api_key, base_url))
    }

    /// Use a preconfigured HTTP client
    pub fn with_client(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build from the `[providers.gemini]` section.
    ///
    /// Fails when no API key is configured, either inline or via the
    /// environment variable named by `api_key_env`.
    pub fn from_config(config: &FileGeminiConfig) -> Result<Self, GatewayError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            GatewayError::Other(format!(
                "Gemini API key not set (export {} or set providers.gemini.api_key)",
                config.api_key_env
            ))
        })?;
        Self::new(
            api_key,
            config.base_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn endpoint(&self, model: &Model) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn generate(
        &self,
        model: &Model,
        request: &GenerationRequest,
    ) -> Result<ModelReply, GatewayError> {
        let url = self.endpoint(model);
        debug!(model = %model, prompt_bytes = request.prompt.len(), "POST generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::from(request))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        parse_reply(&body)
    }
}

fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::Connection(error.to_string())
    } else {
        GatewayError::Other(error.to_string())
    }
}

/// Message from the `{"error": {"message"}}` envelope, or a body preview
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => preview(body, 200),
    }
}

fn parse_reply(body: &str) -> Result<ModelReply, GatewayError> {
    serde_json::from_str::<WireReply>(body)
        .map(ModelReply::from)
        .map_err(|e| GatewayError::InvalidResponse(format!("{}: {}", e, preview(body, 120))))
}
