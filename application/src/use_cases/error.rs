//! Terminal answering errors

use quizquorum_domain::{DomainError, ModelResult};
use thiserror::Error;

/// Terminal failure delivered to every caller waiting on a question.
///
/// `Clone` so coalesced waiters can each receive the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("No models configured")]
    NoModels,

    /// Every contributing model failed; carries `model: reason` pairs
    #[error("All models failed{}", detail_suffix(.0))]
    AllModelsFailed(String),

    #[error("Answer service is not started")]
    NotStarted,

    #[error("Answer worker stopped before settling the question")]
    WorkerStopped,
}

impl AnswerError {
    /// Convert a domain error, attaching per-model failure reasons
    pub fn from_domain(err: DomainError, results: &[ModelResult]) -> Self {
        match err {
            DomainError::AllModelsFailed => AnswerError::all_failed(results),
            DomainError::NoModels => AnswerError::NoModels,
            DomainError::InvalidQuestion(message) => AnswerError::InvalidQuestion(message),
        }
    }

    /// Build the terminal error from failed results
    pub fn all_failed(results: &[ModelResult]) -> Self {
        let detail = results
            .iter()
            .filter_map(|r| r.failure_summary())
            .collect::<Vec<_>>()
            .join("; ");
        AnswerError::AllModelsFailed(detail)
    }

    pub fn is_all_failed(&self) -> bool {
        matches!(self, AnswerError::AllModelsFailed(_))
    }
}

impl From<DomainError> for AnswerError {
    fn from(err: DomainError) -> Self {
        AnswerError::from_domain(err, &[])
    }
}

fn detail_suffix(detail: &str) -> String {
    if detail.is_empty() {
        String::new()
    } else {
        format!(" ({})", detail)
    }
}
