//! Execution parameters: retry and caching control.
//!
//! [`ExecutionParams`] groups the static parameters that control how model
//! calls are retried and how long answers are remembered. These are
//! application-layer concerns, not domain policy.

use quizquorum_domain::{FailureKind, SafetyPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry, generation and cache parameters.
///
/// | Field | Used by |
/// |-------|---------|
/// | `max_attempts`, `retry_base_delay` | `ModelInvoker` |
/// | `max_output_tokens`, `safety` | every `GenerationRequest` |
/// | `cache_ttl` | `AnswerService` dedup cache |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Attempts per model call, including the first.
    pub max_attempts: u32,
    /// Backoff unit: attempt n waits `n × base` (doubled for overload).
    pub retry_base_delay: Duration,
    /// Cap on generated tokens per call.
    pub max_output_tokens: u32,
    /// Content filtering requested from the provider.
    pub safety: SafetyPolicy,
    /// How long a resolved answer stays cached.
    pub cache_ttl: Duration,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_base_delay: Duration::from_millis(1000),
            max_output_tokens: 1024,
            safety: SafetyPolicy::Permissive,
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }

    pub fn with_safety(mut self, safety: SafetyPolicy) -> Self {
        self.safety = safety;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Delay before retrying after failed attempt number `attempt` (1-based)
    pub fn retry_delay(&self, attempt: u32, kind: FailureKind) -> Duration {
        let multiplier = if kind.uses_extended_backoff() { 2 } else { 1 };
        self.retry_base_delay * attempt * multiplier
    }
}
