//! Answer Question use case
//!
//! [`AnswerService`] is the process-wide orchestrator: it owns the Dedup
//! Cache, the In-flight Coalescer and the Request Queue, and is constructed
//! once at startup and shared by handle.
//!
//! ```text
//! answer(q) ──► validate ──► key ──► cache hit? ──yes──► cached outcome
//!                                       │ no
//!                                       ▼
//!                                  in flight? ──yes──► await shared handle
//!                                       │ no
//!                                       ▼
//!                            install handle, enqueue ──► await shared handle
//!                                                              ▲
//!   queue worker: dequeue ──► reconcile ──► settle (cache, release) ──┘
//! ```

mod cache;
mod dedup;
mod outcome;
mod queue;

pub use cache::AnswerCache;
pub use dedup::{Admission, AnswerResult, DedupState, InFlightHandle};
pub use outcome::AnswerOutcome;
pub use queue::QueueEntry;

use crate::config::AnswerConfig;
use crate::ports::answer_logger::{AnswerLogger, NoAnswerLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::error::AnswerError;
use crate::use_cases::reconcile::Reconciler;
use queue::QueueWorker;
use quizquorum_domain::{QuestionInput, QuestionKey};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

/// Deduplicating, queue-backed question answering service
pub struct AnswerService<G: LlmGateway + 'static> {
    reconciler: Arc<Reconciler<G>>,
    config: AnswerConfig,
    state: Arc<Mutex<DedupState>>,
    sender: mpsc::UnboundedSender<QueueEntry>,
    receiver: Mutex<Option<mpsc::UnboundedReceiver<QueueEntry>>>,
    progress: Arc<dyn ProgressNotifier>,
    logger: Arc<dyn AnswerLogger>,
}

impl<G: LlmGateway + 'static> AnswerService<G> {
    pub fn new(reconciler: Arc<Reconciler<G>>, config: AnswerConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            reconciler,
            state: Arc::new(Mutex::new(DedupState::new(config.execution().cache_ttl))),
            config,
            sender,
            receiver: Mutex::new(Some(receiver)),
            progress: Arc::new(NoProgress),
            logger: Arc::new(NoAnswerLogger),
        }
    }

    /// Build the reconciler for `config` on top of a gateway
    pub fn from_gateway(gateway: Arc<G>, config: AnswerConfig) -> Self {
        let reconciler = Arc::new(Reconciler::new(gateway, &config));
        Self::new(reconciler, config)
    }

    /// Set the progress notifier. Takes effect at `start`.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Set the answer logger. Takes effect at `start`.
    pub fn with_logger(mut self, logger: Arc<dyn AnswerLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &AnswerConfig {
        &self.config
    }

    /// Spawn the queue worker.
    ///
    /// Idempotent: only the first call spawns; later calls return `false`.
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> bool {
        let Some(receiver) = self
            .receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        else {
            debug!("Answer queue worker already running");
            return false;
        };

        let worker = QueueWorker {
            reconciler: Arc::clone(&self.reconciler),
            state: Arc::clone(&self.state),
            params: self.config.execution().clone(),
            progress: Arc::clone(&self.progress),
            logger: Arc::clone(&self.logger),
        };
        tokio::spawn(worker.run(receiver));
        true
    }

    pub fn is_started(&self) -> bool {
        self.receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Answer one question.
    ///
    /// Identical questions share work: a fresh cached answer is returned
    /// without any model call, and a question already being resolved is
    /// awaited instead of recomputed. Every waiter receives the same result.
    pub async fn answer(&self, input: QuestionInput) -> AnswerResult {
        input.validate()?;
        if !self.is_started() {
            return Err(AnswerError::NotStarted);
        }

        let admitted_at = Instant::now();
        let key = QuestionKey::from_input(&input);
        let admission = self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .admit(&key, admitted_at);

        match admission {
            Admission::Cached(resolution) => {
                debug!(key = %key, "Answer served from cache");
                let elapsed = admitted_at.elapsed().as_millis() as u64;
                Ok(AnswerOutcome::from_cache(resolution, elapsed))
            }
            Admission::Joined(handle) => {
                debug!(key = %key, "Joining in-flight question");
                handle.await
            }
            Admission::Admitted { handle, settle } => {
                let entry = QueueEntry {
                    key: key.clone(),
                    input,
                    reply: settle,
                    enqueued_at: admitted_at,
                };
                if self.sender.send(entry).is_err() {
                    self.state
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .abandon(&key);
                    return Err(AnswerError::WorkerStopped);
                }
                debug!(key = %key, "Question enqueued");
                handle.await
            }
        }
    }

    /// Number of fresh-or-stale entries currently cached
    pub fn cached_len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cached_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionParams;
    use crate::ports::answer_logger::AnswerEvent;
    use crate::test_support::ScriptedGateway;
    use quizquorum_domain::{AnswerOption, Model, QuestionType, ResolutionMethod};
    use std::time::Duration;

    fn agreeing_gateway() -> ScriptedGateway {
        ScriptedGateway::new()
            .answers(Model::Gemini25Flash, "B", 80)
            .answers(Model::Gemini25FlashLite, "B", 90)
            .answers(Model::Gemini20Flash, "B", 70)
    }

    fn service(gateway: &Arc<ScriptedGateway>) -> AnswerService<ScriptedGateway> {
        AnswerService::from_gateway(Arc::clone(gateway), AnswerConfig::default())
    }

    fn question() -> QuestionInput {
        QuestionInput::structured(
            "Which planet is known as the red planet?",
            vec![AnswerOption::new("A", "Venus"), AnswerOption::new("B", "Mars")],
            QuestionType::SingleChoice,
        )
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<AnswerEvent>>,
    }

    impl AnswerLogger for RecordingLogger {
        fn log(&self, event: AnswerEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeat_within_ttl_is_cached() {
        let gateway = Arc::new(agreeing_gateway());
        let service = service(&gateway);
        assert!(service.start());

        let first = service.answer(question()).await.unwrap();
        let second = service.answer(question()).await.unwrap();

        assert_eq!(first.answer, "B");
        assert_eq!(first.method, ResolutionMethod::Unanimous);
        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(second.answer, first.answer);
        assert_eq!(second.confidence, first.confidence);
        assert_eq!(gateway.total_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_recomputed() {
        let gateway = Arc::new(agreeing_gateway());
        let config = AnswerConfig::default().with_execution(
            ExecutionParams::default().with_cache_ttl(Duration::from_secs(60)),
        );
        let service = AnswerService::from_gateway(Arc::clone(&gateway), config);
        service.start();

        service.answer(question()).await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;
        let again = service.answer(question()).await.unwrap();

        assert!(!again.cached);
        assert_eq!(gateway.total_calls(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_duplicates_coalesce() {
        let gateway = Arc::new(agreeing_gateway().with_delay(Duration::from_millis(200)));
        let service = service(&gateway);
        service.start();

        let requests = (0..5).map(|_| service.answer(question()));
        let results = futures::future::join_all(requests).await;

        assert_eq!(gateway.total_calls(), 3);
        for result in results {
            assert_eq!(result.unwrap().answer, "B");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_variants_share_a_key() {
        let gateway = Arc::new(agreeing_gateway());
        let service = service(&gateway);
        service.start();

        service.answer(QuestionInput::from("Is the sky blue?")).await.unwrap();
        let second = service
            .answer(QuestionInput::from("  Is   the sky blue  "))
            .await
            .unwrap();

        assert!(second.cached);
        assert_eq!(gateway.total_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_failed_is_rejected_and_retried_fresh() {
        let gateway = Arc::new(ScriptedGateway::new());
        let service = service(&gateway);
        service.start();

        let err = service.answer(question()).await.unwrap_err();
        assert!(err.is_all_failed());
        assert_eq!(gateway.total_calls(), 4);

        let err = service.answer(question()).await.unwrap_err();
        assert!(err.is_all_failed());
        assert_eq!(gateway.total_calls(), 8);
        assert_eq!(service.cached_len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_failed_rejects_every_waiter_once() {
        let gateway = Arc::new(ScriptedGateway::new().with_delay(Duration::from_millis(200)));
        let service = service(&gateway);
        service.start();
        let key = QuestionKey::from_input(&question());

        let requests = (0..4).map(|_| service.answer(question()));
        let results = futures::future::join_all(requests).await;

        assert_eq!(gateway.total_calls(), 4);
        let first = results[0].clone().unwrap_err();
        assert!(matches!(first, AnswerError::AllModelsFailed(_)));
        for result in &results {
            assert_eq!(result, &Err(first.clone()));
        }
        {
            let state = service.state.lock().unwrap();
            assert!(!state.is_in_flight(&key));
            assert!(!state.is_cached(&key));
        }

        let again = service.answer(question()).await;
        assert_eq!(again, Err(first));
        assert_eq!(gateway.total_calls(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_queue_resolves_one_question_at_a_time() {
        let gateway = Arc::new(agreeing_gateway().with_delay(Duration::from_millis(100)));
        let service = service(&gateway);
        service.start();

        let (first, second) = tokio::join!(
            service.answer(QuestionInput::from("first question")),
            service.answer(QuestionInput::from("second question")),
        );
        first.unwrap();
        second.unwrap();

        let prompts = gateway.prompts();
        assert_eq!(prompts.len(), 6);
        assert!(prompts[..3].iter().all(|p| p.contains("first question")));
        assert!(prompts[3..].iter().all(|p| p.contains("second question")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_questions_are_logged() {
        let gateway = Arc::new(agreeing_gateway());
        let logger = Arc::new(RecordingLogger::default());
        let service = service(&gateway).with_logger(logger.clone());
        service.start();

        service.answer(question()).await.unwrap();
        service.answer(question()).await.unwrap();

        let events = logger.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "answer_resolved");
        assert_eq!(events[0].payload["answer"], "B");
        assert_eq!(events[0].payload["method"], "unanimous");
    }

    #[tokio::test]
    async fn test_start_is_idempotent() {
        let service = service(&Arc::new(ScriptedGateway::new()));
        assert!(!service.is_started());
        assert!(service.start());
        assert!(!service.start());
        assert!(service.is_started());
    }

    #[tokio::test]
    async fn test_answer_before_start() {
        let service = service(&Arc::new(agreeing_gateway()));
        assert_eq!(
            service.answer(question()).await,
            Err(AnswerError::NotStarted)
        );
    }

    #[tokio::test]
    async fn test_blank_question_is_rejected() {
        let service = service(&Arc::new(agreeing_gateway()));
        service.start();
        let err = service.answer(QuestionInput::from("   ")).await.unwrap_err();
        assert!(matches!(err, AnswerError::InvalidQuestion(_)));
    }
}
