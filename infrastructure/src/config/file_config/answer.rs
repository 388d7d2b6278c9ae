//! Answer reconciliation configuration from TOML (`[answer]` section)
//!
//! ```toml
//! [answer]
//! ensemble = true            # false = sequential failover chain
//! strategy = "judge"         # or "weighted"
//! rule = "majority"          # or "unanimous", "atleast:2", "75%"
//! confidence_threshold = 70  # advisory only
//! ```

use quizquorum_domain::{ConfigIssue, ConfigIssueCode, QuorumRule, ReconcileMode, VotingStrategy};
use quizquorum_application::DEFAULT_CONFIDENCE_THRESHOLD;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnswerConfig {
    /// Query workers in parallel (true) or walk the failover chain (false)
    pub ensemble: bool,
    /// How split workers are settled: "judge" or "weighted"
    pub strategy: String,
    /// Agreement rule among workers
    pub rule: String,
    /// Advisory confidence threshold (0-100)
    pub confidence_threshold: u32,
}

impl Default for FileAnswerConfig {
    fn default() -> Self {
        Self {
            ensemble: true,
            strategy: VotingStrategy::default().as_str().to_string(),
            rule: QuorumRule::default().as_config_str(),
            confidence_threshold: u32::from(DEFAULT_CONFIDENCE_THRESHOLD),
        }
    }
}

impl FileAnswerConfig {
    /// Parse the strategy, falling back to `judge` on unknown values
    pub fn parse_strategy(&self) -> (VotingStrategy, Vec<ConfigIssue>) {
        match self.strategy.parse() {
            Ok(strategy) => (strategy, Vec::new()),
            Err(e) => (
                VotingStrategy::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::UnknownStrategy,
                    format!("answer.strategy: {}, falling back to 'judge'", e),
                )],
            ),
        }
    }

    /// Parse the rule, falling back to majority on unparseable values
    pub fn parse_rule(&self) -> (QuorumRule, Vec<ConfigIssue>) {
        match self.rule.parse() {
            Ok(rule) => (rule, Vec::new()),
            Err(e) => (
                QuorumRule::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidRule,
                    format!("answer.rule: {}, falling back to 'majority'", e),
                )],
            ),
        }
    }

    pub fn parse_threshold(&self) -> (u8, Vec<ConfigIssue>) {
        match u8::try_from(self.confidence_threshold) {
            Ok(threshold) if threshold <= 100 => (threshold, Vec::new()),
            _ => (
                100,
                vec![ConfigIssue::error(
                    ConfigIssueCode::ThresholdOutOfRange,
                    format!(
                        "answer.confidence_threshold: {} is above 100",
                        self.confidence_threshold
                    ),
                )],
            ),
        }
    }

    pub fn mode(&self) -> ReconcileMode {
        ReconcileMode::from_settings(self.ensemble, self.parse_strategy().0)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_strategy().1;
        issues.extend(self.parse_rule().1);
        issues.extend(self.parse_threshold().1);
        issues
    }
}
