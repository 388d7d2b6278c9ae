//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into the application's
//! [`AnswerConfig`] once validated.

mod answer;
mod execution;
mod logging;
mod models;
mod output;
mod providers;

pub use answer::FileAnswerConfig;
pub use execution::FileExecutionConfig;
pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{FileGeminiConfig, FileProvidersConfig};

use quizquorum_application::AnswerConfig;
use quizquorum_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected because it contains at least one error-level issue
#[derive(Debug, Error)]
#[error("invalid configuration:\n{}", render_issues(.issues))]
pub struct ConfigValidationError {
    pub issues: Vec<ConfigIssue>,
}

fn render_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| format!("  - {}", i.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Worker, judge and failover models
    pub models: FileModelsConfig,
    /// Reconciliation mode and agreement rule
    pub answer: FileAnswerConfig,
    /// Retry, generation and cache limits
    pub execution: FileExecutionConfig,
    /// Provider endpoints and credentials
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Structured answer log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Covers what only the raw file can express (blank names, unknown
    /// strings, out-of-range numbers). Checks on the combined runtime
    /// configuration live in [`AnswerConfig::validate`].
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.models.validate();
        issues.extend(self.answer.validate());
        issues.extend(self.execution.validate());
        issues.extend(self.output.parse_format().1);
        issues
    }

    /// Validate and return only the warnings, or fail on the first error set
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let issues = self.validate();
        if issues.iter().any(ConfigIssue::is_error) {
            return Err(ConfigValidationError { issues });
        }
        Ok(issues)
    }

    /// Convert into the application configuration.
    ///
    /// Invalid values are replaced by their fallbacks; call [`Self::check`]
    /// first to surface them.
    pub fn to_answer_config(&self) -> AnswerConfig {
        AnswerConfig::new(
            self.answer.mode(),
            self.models.to_roster(),
            self.answer.parse_rule().0,
            self.execution.to_execution_params(),
        )
        .with_confidence_threshold(self.answer.parse_threshold().0)
    }
}
