//! Answer configuration container.
//!
//! [`AnswerConfig`] groups everything the answering pipeline needs: the
//! reconciliation mode, the model roster, the agreement rule, execution
//! parameters and the advisory confidence threshold.
//!
//! Only the confidence threshold is advisory: the core never rejects an
//! answer for low confidence, it only exposes
//! [`AnswerOutcome::is_confident`](crate::AnswerOutcome::is_confident) for
//! downstream policy.

use crate::config::ExecutionParams;
use quizquorum_domain::{
    ConfigIssue, ConfigIssueCode, ModelRoster, QuorumRule, ReconcileMode, Severity,
};

/// Default advisory confidence threshold (percent)
pub const DEFAULT_CONFIDENCE_THRESHOLD: u8 = 70;

/// Configuration for the answering pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerConfig {
    mode: ReconcileMode,
    models: ModelRoster,
    rule: QuorumRule,
    execution: ExecutionParams,
    confidence_threshold: u8,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            mode: ReconcileMode::default(),
            models: ModelRoster::default(),
            rule: QuorumRule::default(),
            execution: ExecutionParams::default(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl AnswerConfig {
    pub fn new(
        mode: ReconcileMode,
        models: ModelRoster,
        rule: QuorumRule,
        execution: ExecutionParams,
    ) -> Self {
        Self {
            mode,
            models,
            rule,
            execution,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }

    // ==================== Accessors ====================

    pub fn mode(&self) -> ReconcileMode {
        self.mode
    }

    pub fn models(&self) -> &ModelRoster {
        &self.models
    }

    pub fn rule(&self) -> QuorumRule {
        self.rule
    }

    pub fn execution(&self) -> &ExecutionParams {
        &self.execution
    }

    pub fn confidence_threshold(&self) -> u8 {
        self.confidence_threshold
    }

    // ==================== Builder Methods ====================

    pub fn with_mode(mut self, mode: ReconcileMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_models(mut self, models: ModelRoster) -> Self {
        self.models = models;
        self
    }

    pub fn with_rule(mut self, rule: QuorumRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }

    pub fn with_confidence_threshold(mut self, threshold: u8) -> Self {
        self.confidence_threshold = threshold.min(100);
        self
    }

    // ==================== Validation ====================

    /// Check the runtime combination of mode, roster and limits.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.execution.max_attempts == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroAttempts,
                "max_attempts must be at least 1",
            ));
        }

        match self.mode {
            ReconcileMode::Ensemble | ReconcileMode::Weighted if self.models.workers.is_empty() => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::TooFewWorkers,
                    format!("{} mode needs at least one worker model", self.mode),
                ));
            }
            ReconcileMode::Ensemble if self.models.workers.len() < 3 => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::TooFewWorkers,
                    format!(
                        "ensemble voting with {} worker(s); majority needs 3 for a tie-free vote",
                        self.models.workers.len()
                    ),
                ));
            }
            _ => {}
        }

        issues
    }

    /// Check whether any issues are errors (i.e. fatal).
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}
