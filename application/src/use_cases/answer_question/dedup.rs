//! In-flight Coalescer
//!
//! Admission state for questions: the cache plus the map of computations
//! still running. Both live behind one lock, so "cached", "in flight" and
//! "neither" are decided and changed atomically; a key is never both.

use super::cache::AnswerCache;
use super::outcome::AnswerOutcome;
use crate::use_cases::error::AnswerError;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use quizquorum_domain::{QuestionKey, Resolution};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;

/// Result every waiter on a question receives
pub type AnswerResult = Result<AnswerOutcome, AnswerError>;

/// Cloneable handle to one running computation
pub type InFlightHandle = Shared<BoxFuture<'static, AnswerResult>>;

/// How a request was admitted
pub enum Admission {
    /// Fresh cache hit
    Cached(Resolution),
    /// Attached to a computation already running
    Joined(InFlightHandle),
    /// New computation; the caller must enqueue it and the queue worker
    /// settles it through `settle`
    Admitted {
        handle: InFlightHandle,
        settle: oneshot::Sender<AnswerResult>,
    },
}

/// Cache and in-flight map guarded together
pub struct DedupState {
    cache: AnswerCache,
    in_flight: HashMap<QuestionKey, InFlightHandle>,
}

impl DedupState {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: AnswerCache::new(ttl),
            in_flight: HashMap::new(),
        }
    }

    /// Decide how a request for `key` proceeds.
    ///
    /// Cache lookup precedes coalescing; expired entries are swept first.
    pub fn admit(&mut self, key: &QuestionKey, now: Instant) -> Admission {
        self.cache.sweep(now);

        if let Some(resolution) = self.cache.get(key) {
            return Admission::Cached(resolution.clone());
        }
        if let Some(handle) = self.in_flight.get(key) {
            return Admission::Joined(handle.clone());
        }

        let (settle, receiver) = oneshot::channel();
        let handle = receiver
            .map(|received| received.unwrap_or(Err(AnswerError::WorkerStopped)))
            .boxed()
            .shared();
        self.in_flight.insert(key.clone(), handle.clone());
        Admission::Admitted { handle, settle }
    }

    /// Record the outcome of a computation and release its in-flight slot.
    ///
    /// Successful answers are cached; failures are not, so the next request
    /// recomputes.
    pub fn settle(&mut self, key: &QuestionKey, result: &AnswerResult, now: Instant) {
        if let Ok(outcome) = result {
            let resolution = Resolution::new(
                outcome.answer.clone(),
                outcome.confidence,
                outcome.method,
                outcome.models.clone(),
            );
            self.cache.insert(key.clone(), resolution, now);
        }
        self.in_flight.remove(key);
    }

    /// Release an in-flight slot that will never be settled
    pub fn abandon(&mut self, key: &QuestionKey) {
        self.in_flight.remove(key);
    }

    pub fn is_in_flight(&self, key: &QuestionKey) -> bool {
        self.in_flight.contains_key(key)
    }

    pub fn is_cached(&self, key: &QuestionKey) -> bool {
        self.cache.contains(key)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl std::fmt::Debug for Admission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Admission::Cached(resolution) => f.debug_tuple("Cached").field(resolution).finish(),
            Admission::Joined(_) => f.write_str("Joined"),
            Admission::Admitted { .. } => f.write_str("Admitted"),
        }
    }
}
