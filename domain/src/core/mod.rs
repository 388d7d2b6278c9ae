//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: available LLM models
//! - [`question::QuestionInput`]: a question posed to the models, and its [`question::QuestionKey`]
//! - [`failure::FailureKind`]: classification of failed model calls
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod failure;
pub mod model;
pub mod question;
pub mod string;
