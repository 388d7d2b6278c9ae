//! Configuration issues.
//!
//! Validation never aborts on the first problem: it collects every issue
//! with a severity so callers can report warnings and stop only on errors.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: execution continues with a fallback.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A worker, judge or failover model name is blank.
    EmptyModelName,
    /// `answer.strategy` is not a known voting strategy.
    UnknownStrategy,
    /// `answer.rule` could not be parsed.
    InvalidRule,
    /// `execution.max_attempts` is zero.
    ZeroAttempts,
    /// `answer.confidence_threshold` is above 100.
    ThresholdOutOfRange,
    /// `execution.cache_ttl_seconds` is zero.
    ZeroCacheTtl,
    /// Judge voting with fewer than three workers.
    TooFewWorkers,
    /// `output.format` is not a known format.
    UnknownOutputFormat,
}

/// A detected configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let issue = ConfigIssue::error(ConfigIssueCode::ZeroAttempts, "max_attempts must be >= 1");
        assert!(issue.is_error());
        assert_eq!(issue.to_string(), "error: max_attempts must be >= 1");

        let issue = ConfigIssue::warning(ConfigIssueCode::ZeroCacheTtl, "answers expire immediately");
        assert!(!issue.is_error());
    }
}
