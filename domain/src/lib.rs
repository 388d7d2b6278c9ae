//! Domain layer for quizquorum
//!
//! This crate contains the core answer-reconciliation logic, entities, and
//! value objects. It has no dependencies on infrastructure or presentation
//! concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Question identity
//!
//! A [`QuestionInput`] (plain text or structured multiple choice) maps to a
//! [`QuestionKey`]; identical submissions share one key, which drives
//! caching and in-flight coalescing.
//!
//! ## Answers
//!
//! Raw model text is turned into a [`ParsedAnswer`] by [`parse_answer`] and
//! normalized with [`normalize_answer`] before votes are counted.
//!
//! ## Reconciliation
//!
//! - **Ensemble** (default): parallel workers vote; a judge breaks splits
//! - **Weighted**: confidence-weighted choice among any number of results
//! - **Failover**: first success in a fixed model order

pub mod answer;
pub mod config;
pub mod core;
pub mod prompt;
pub mod quorum;
pub mod session;

// Re-export commonly used types
pub use answer::{ParsedAnswer, answer_letters, normalize_answer, parse_answer};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    failure::FailureKind,
    model::Model,
    question::{AnswerOption, QuestionInput, QuestionKey, QuestionType, StructuredQuestion},
};
pub use prompt::PromptTemplate;
pub use session::{
    request::{GenerationRequest, SafetyPolicy},
    response::{Candidate, EmptyReply, ModelReply, PromptFeedback, SafetyRating},
};

// Re-export quorum types
pub use quorum::{
    ModelResult, ModelRoster, Phase, QuorumRule, ReconcileMode, Resolution, ResolutionMethod,
    VoteTally, VotingStrategy, WorkerVerdict,
};
