//! Scripted in-memory gateway shared by the use case tests

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use async_trait::async_trait;
use quizquorum_domain::{GenerationRequest, Model, ModelReply};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

type Reply = Result<ModelReply, GatewayError>;

/// Gateway that answers from per-model scripts and counts calls.
///
/// Each model first consumes its queued one-off replies (`then_*`), then
/// repeats its default reply. Models with neither get an HTTP 404.
#[derive(Default)]
pub struct ScriptedGateway {
    queued: Mutex<HashMap<Model, VecDeque<Reply>>>,
    defaults: Mutex<HashMap<Model, Reply>>,
    calls: Mutex<HashMap<Model, usize>>,
    prompts: Mutex<Vec<String>>,
    delay: Duration,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep before every reply (virtual time under a paused clock)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Default JSON answer for `model`
    pub fn answers(self, model: Model, answer: &str, confidence: u8) -> Self {
        let text = format!(r#"{{"answer": "{}", "confidence": {}}}"#, answer, confidence);
        self.replies(model, Ok(ModelReply::from_text(text)))
    }

    /// Default raw reply for `model`
    pub fn replies(mut self, model: Model, reply: Reply) -> Self {
        self.defaults.get_mut().unwrap().insert(model, reply);
        self
    }

    /// Default failure for `model`
    pub fn fails(self, model: Model, error: GatewayError) -> Self {
        self.replies(model, Err(error))
    }

    /// One-off reply consumed before the default
    pub fn then(mut self, model: Model, reply: Reply) -> Self {
        self.queued
            .get_mut()
            .unwrap()
            .entry(model)
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self, model: &Model) -> usize {
        self.calls.lock().unwrap().get(model).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    /// Every prompt received, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

pub fn overloaded() -> GatewayError {
    GatewayError::Http {
        status: 503,
        message: "The model is overloaded. Please try again later.".to_string(),
    }
}

pub fn unauthorized() -> GatewayError {
    GatewayError::Http {
        status: 401,
        message: "API key not valid".to_string(),
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn generate(
        &self,
        model: &Model,
        request: &GenerationRequest,
    ) -> Result<ModelReply, GatewayError> {
        *self.calls.lock().unwrap().entry(model.clone()).or_insert(0) += 1;
        self.prompts.lock().unwrap().push(request.prompt.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let queued = self
            .queued
            .lock()
            .unwrap()
            .get_mut(model)
            .and_then(|q| q.pop_front());
        if let Some(reply) = queued {
            return reply;
        }
        self.defaults
            .lock()
            .unwrap()
            .get(model)
            .cloned()
            .unwrap_or_else(|| {
                Err(GatewayError::Http {
                    status: 404,
                    message: format!("models/{} is not found", model),
                })
            })
    }
}
