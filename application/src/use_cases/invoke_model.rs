//! Model Invoker
//!
//! Calls one model with retry/backoff and turns the outcome into a
//! [`ModelResult`]. Invocations share no mutable state, so any number can
//! run concurrently.
//!
//! Each attempt fails when the gateway errors, the reply carries no text, or
//! the text holds no recognizable answer. Failures are classified with
//! [`FailureKind`]; authentication and unknown-model failures end the call
//! immediately, everything else is retried after `attempt × base` (doubled
//! for overload and rate limits).

use crate::config::ExecutionParams;
use crate::ports::llm_gateway::LlmGateway;
use quizquorum_domain::core::string::preview;
use quizquorum_domain::{FailureKind, GenerationRequest, Model, ModelResult, parse_answer};
use std::sync::Arc;
use tracing::{debug, warn};

/// Retrying caller for a single model
pub struct ModelInvoker<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    params: ExecutionParams,
}

impl<G: LlmGateway + 'static> Clone for ModelInvoker<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            params: self.params.clone(),
        }
    }
}

impl<G: LlmGateway + 'static> ModelInvoker<G> {
    pub fn new(gateway: Arc<G>, params: ExecutionParams) -> Self {
        Self { gateway, params }
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    /// Invoke `model` until it yields an answer or attempts run out.
    ///
    /// Never fails past its own boundary: exhausted retries become a failed
    /// [`ModelResult`] carrying the last classified error.
    pub async fn invoke(&self, model: &Model, request: &GenerationRequest) -> ModelResult {
        let max_attempts = self.params.max_attempts.max(1);
        let mut last_failure = FailureKind::Unknown;

        for attempt in 1..=max_attempts {
            let (kind, detail) = match self.gateway.generate(model, request).await {
                Ok(reply) => match reply.into_text() {
                    Ok(text) => {
                        let parsed = parse_answer(Some(&text));
                        if !parsed.is_empty() {
                            debug!(
                                model = %model,
                                attempt,
                                answer = %parsed.answer,
                                confidence = parsed.confidence,
                                "Model answered"
                            );
                            return ModelResult::success(
                                model.clone(),
                                parsed.answer,
                                parsed.confidence,
                            )
                            .with_attempts(attempt);
                        }
                        (
                            FailureKind::EmptyResponse,
                            format!("no recognizable answer in {:?}", preview(&text, 80)),
                        )
                    }
                    Err(empty) => (empty.failure_kind(), empty.to_string()),
                },
                Err(e) => (e.kind(), e.to_string()),
            };
            last_failure = kind;

            if !kind.is_retryable() {
                warn!(model = %model, attempt, error = %kind, detail = %detail, "Model call failed, not retrying");
                return ModelResult::failure(model.clone(), kind).with_attempts(attempt);
            }

            if attempt < max_attempts {
                let backoff = self.params.retry_delay(attempt, kind);
                warn!(
                    model = %model,
                    attempt,
                    max_attempts,
                    error = %kind,
                    detail = %detail,
                    backoff_ms = backoff.as_millis() as u64,
                    "Model call failed, retrying"
                );
                tokio::time::sleep(backoff).await;
            } else {
                warn!(model = %model, attempts = max_attempts, error = %kind, detail = %detail, "Model call failed, giving up");
            }
        }

        ModelResult::failure(model.clone(), last_failure).with_attempts(max_attempts)
    }
}
