//! Request Queue
//!
//! FIFO of admitted questions drained by exactly one worker task. The worker
//! resolves one question completely before taking the next; parallelism
//! only happens across models inside a single reconciliation.

use super::dedup::{AnswerResult, DedupState};
use super::outcome::AnswerOutcome;
use crate::config::ExecutionParams;
use crate::ports::answer_logger::{AnswerEvent, AnswerLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::reconcile::Reconciler;
use crate::use_cases::shared::ReconcileInput;
use quizquorum_domain::{QuestionInput, QuestionKey};
use serde_json::json;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// One admitted question waiting for the worker
pub struct QueueEntry {
    pub key: QuestionKey,
    pub input: QuestionInput,
    pub reply: oneshot::Sender<AnswerResult>,
    pub enqueued_at: Instant,
}

/// The single consumer of the request queue
pub(crate) struct QueueWorker<G: LlmGateway + 'static> {
    pub reconciler: Arc<Reconciler<G>>,
    pub state: Arc<Mutex<DedupState>>,
    pub params: ExecutionParams,
    pub progress: Arc<dyn ProgressNotifier>,
    pub logger: Arc<dyn AnswerLogger>,
}

impl<G: LlmGateway + 'static> QueueWorker<G> {
    /// Drain the queue until every sender is gone
    pub async fn run(self, mut receiver: mpsc::UnboundedReceiver<QueueEntry>) {
        info!("Answer queue worker started");
        while let Some(entry) = receiver.recv().await {
            self.process(entry).await;
        }
        info!("Answer queue worker stopped");
    }

    async fn process(&self, entry: QueueEntry) {
        let QueueEntry {
            key,
            input,
            reply,
            enqueued_at,
        } = entry;
        debug!(
            key = %key,
            waited_ms = enqueued_at.elapsed().as_millis() as u64,
            "Dequeued question"
        );

        let request = ReconcileInput::from_question(&input, &self.params);
        let resolution = self
            .reconciler
            .reconcile(&request, self.progress.as_ref())
            .await;
        let duration_ms = enqueued_at.elapsed().as_millis() as u64;
        let result: AnswerResult =
            resolution.map(|resolution| AnswerOutcome::resolved(resolution, duration_ms));

        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .settle(&key, &result, Instant::now());

        self.log_result(&key, &result);

        if reply.send(result).is_err() {
            warn!(key = %key, "Question settled after its handle was dropped");
        }
    }

    fn log_result(&self, key: &QuestionKey, result: &AnswerResult) {
        let event = match result {
            Ok(outcome) => {
                info!(
                    key = %key,
                    answer = %outcome.answer,
                    confidence = outcome.confidence,
                    method = %outcome.method,
                    duration_ms = outcome.duration_ms,
                    "Question resolved"
                );
                AnswerEvent::new(
                    "answer_resolved",
                    json!({
                        "key": key.as_str(),
                        "answer": outcome.answer,
                        "confidence": outcome.confidence,
                        "method": outcome.method,
                        "models": outcome.models,
                        "duration_ms": outcome.duration_ms,
                    }),
                )
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Question failed");
                AnswerEvent::new(
                    "answer_failed",
                    json!({
                        "key": key.as_str(),
                        "error": e.to_string(),
                    }),
                )
            }
        };
        self.logger.log(event);
    }
}
