//! What callers receive for a settled question

use quizquorum_domain::{Model, Resolution, ResolutionMethod};
use serde::Serialize;

/// Final answer delivered to every caller of a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub answer: String,
    pub confidence: u8,
    pub method: ResolutionMethod,
    pub models: Vec<Model>,
    /// Wall time from admission to delivery
    pub duration_ms: u64,
    /// Served from the dedup cache without any model call
    pub cached: bool,
}

impl AnswerOutcome {
    /// Outcome of a fresh reconciliation
    pub fn resolved(resolution: Resolution, duration_ms: u64) -> Self {
        Self::build(resolution, duration_ms, false)
    }

    /// Outcome served from the cache
    pub fn from_cache(resolution: Resolution, duration_ms: u64) -> Self {
        Self::build(resolution, duration_ms, true)
    }

    fn build(resolution: Resolution, duration_ms: u64, cached: bool) -> Self {
        Self {
            answer: resolution.answer,
            confidence: resolution.confidence,
            method: resolution.method,
            models: resolution.models,
            duration_ms,
            cached,
        }
    }

    /// Whether the answer meets an advisory confidence threshold.
    ///
    /// The core never acts on this; callers decide what a low-confidence
    /// answer means for them.
    pub fn is_confident(&self, threshold: u8) -> bool {
        self.confidence >= threshold
    }
}
