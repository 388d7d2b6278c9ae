//! Port for structured answer logging.
//!
//! Defines the [`AnswerLogger`] trait for recording every settled question
//! (resolved or failed) to a machine-readable log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures one record
//! per answer in a format suited for later analysis (JSONL).

use serde_json::Value;

/// A structured answer event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Adapters add the timestamp.
#[derive(Debug, Clone)]
pub struct AnswerEvent {
    /// Event type identifier ("answer_resolved" or "answer_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AnswerEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging answer events to a structured log.
///
/// The `log` method is synchronous and infallible so a broken log never
/// disturbs answering; write failures are ignored by adapters.
pub trait AnswerLogger: Send + Sync {
    /// Record an answer event.
    fn log(&self, event: AnswerEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoAnswerLogger;

impl AnswerLogger for NoAnswerLogger {
    fn log(&self, _event: AnswerEvent) {}
}
