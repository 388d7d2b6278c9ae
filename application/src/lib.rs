//! Application layer for quizquorum
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{AnswerConfig, DEFAULT_CONFIDENCE_THRESHOLD, ExecutionParams};
pub use ports::{
    answer_logger::{AnswerEvent, AnswerLogger, NoAnswerLogger},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::ReconcileInput;
pub use use_cases::answer_question::{AnswerOutcome, AnswerResult, AnswerService};
pub use use_cases::error::AnswerError;
pub use use_cases::invoke_model::ModelInvoker;
pub use use_cases::reconcile::Reconciler;
pub use use_cases::run_ensemble::RunEnsembleUseCase;
pub use use_cases::run_failover::RunFailoverUseCase;
pub use use_cases::run_weighted::RunWeightedUseCase;
