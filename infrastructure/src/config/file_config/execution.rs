//! Execution configuration from TOML (`[execution]` section)

use quizquorum_application::ExecutionParams;
use quizquorum_domain::{ConfigIssue, ConfigIssueCode, SafetyPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry, generation and cache limits
///
/// ```toml
/// [execution]
/// max_attempts = 3
/// retry_base_delay_ms = 1000
/// max_output_tokens = 1024
/// cache_ttl_seconds = 3600
/// safety = "permissive"      # or "provider_default"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    pub max_attempts: u32,
    pub retry_base_delay_ms: u64,
    pub max_output_tokens: u32,
    pub cache_ttl_seconds: u64,
    pub safety: SafetyPolicy,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            max_attempts: params.max_attempts,
            retry_base_delay_ms: params.retry_base_delay.as_millis() as u64,
            max_output_tokens: params.max_output_tokens,
            cache_ttl_seconds: params.cache_ttl.as_secs(),
            safety: params.safety,
        }
    }
}

impl FileExecutionConfig {
    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_attempts(self.max_attempts)
            .with_retry_base_delay(Duration::from_millis(self.retry_base_delay_ms))
            .with_max_output_tokens(self.max_output_tokens)
            .with_cache_ttl(Duration::from_secs(self.cache_ttl_seconds))
            .with_safety(self.safety)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.max_attempts == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroAttempts,
                "execution.max_attempts: must be at least 1",
            ));
        }
        if self.cache_ttl_seconds == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroCacheTtl,
                "execution.cache_ttl_seconds: 0 disables caching, every answer expires immediately",
            ));
        }
        issues
    }
}
