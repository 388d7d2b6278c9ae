//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No models configured")]
    NoModels,

    #[error("All models failed")]
    AllModelsFailed,

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),
}

impl DomainError {
    /// Check if this error means every contributing model failed
    pub fn is_all_failed(&self) -> bool {
        matches!(self, DomainError::AllModelsFailed)
    }
}
