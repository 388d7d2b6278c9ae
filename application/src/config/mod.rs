//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`ExecutionParams`]: retries, generation limits, cache TTL
//! - [`AnswerConfig`]: mode, roster, rule and execution in one container

pub mod answer_config;
pub mod execution_params;

pub use answer_config::{AnswerConfig, DEFAULT_CONFIDENCE_THRESHOLD};
pub use execution_params::ExecutionParams;
