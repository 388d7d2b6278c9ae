//! Failure taxonomy for model capability calls
//!
//! Raw service errors (HTTP status codes, SDK messages, empty replies) are
//! folded into a small set of stable categories. The category decides the
//! retry policy and produces the short message users see.

use serde::{Deserialize, Serialize};

/// Stable classification of a failed model call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Server overloaded (HTTP 503 or explicit overload signal)
    Overloaded,
    /// Quota or rate limit hit (HTTP 429)
    RateLimited,
    /// Missing or invalid credentials
    Authentication,
    /// Unknown model identifier
    ModelNotFound,
    Timeout,
    /// Response withheld by the provider's safety filter
    SafetyBlocked,
    /// No usable text, or text with no recognizable answer
    EmptyResponse,
    /// Host unreachable, DNS failure, connection reset
    Network,
    Unknown,
}

impl FailureKind {
    /// Classify from an HTTP status code, if the status is decisive
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            503 => Some(FailureKind::Overloaded),
            429 => Some(FailureKind::RateLimited),
            401 | 403 => Some(FailureKind::Authentication),
            404 => Some(FailureKind::ModelNotFound),
            408 | 504 => Some(FailureKind::Timeout),
            _ => None,
        }
    }

    /// Classify from a raw error message by keyword
    pub fn classify(message: &str) -> Self {
        let msg = message.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| msg.contains(n));

        if has(&["overloaded", "503", "unavailable"]) {
            FailureKind::Overloaded
        } else if has(&["429", "rate limit", "rate_limit", "resource_exhausted", "quota"]) {
            FailureKind::RateLimited
        } else if has(&[
            "401",
            "403",
            "api key",
            "api_key",
            "unauthenticated",
            "permission_denied",
            "permission denied",
        ]) {
            FailureKind::Authentication
        } else if has(&["404", "not found", "not_found"]) {
            FailureKind::ModelNotFound
        } else if has(&["timeout", "timed out", "deadline"]) {
            FailureKind::Timeout
        } else if has(&["safety", "blocked"]) {
            FailureKind::SafetyBlocked
        } else if has(&["empty", "no text", "unparseable"]) {
            FailureKind::EmptyResponse
        } else if has(&[
            "connection",
            "connect",
            "dns",
            "network",
            "unreachable",
            "econnrefused",
            "econnreset",
        ]) {
            FailureKind::Network
        } else {
            FailureKind::Unknown
        }
    }

    /// Whether retrying the same call can plausibly succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            FailureKind::Authentication | FailureKind::ModelNotFound
        )
    }

    /// Whether the failure calls for the doubled backoff
    pub fn uses_extended_backoff(&self) -> bool {
        matches!(self, FailureKind::Overloaded | FailureKind::RateLimited)
    }

    /// Short human-readable description
    pub fn user_message(&self) -> &'static str {
        match self {
            FailureKind::Overloaded => "Model server is overloaded",
            FailureKind::RateLimited => "Rate limit exceeded",
            FailureKind::Authentication => "Invalid or missing API credentials",
            FailureKind::ModelNotFound => "Model not found",
            FailureKind::Timeout => "Model request timed out",
            FailureKind::SafetyBlocked => "Response blocked by safety filter",
            FailureKind::EmptyResponse => "Empty or unparseable model response",
            FailureKind::Network => "Model service unreachable",
            FailureKind::Unknown => "Unknown model error",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(FailureKind::from_status(503), Some(FailureKind::Overloaded));
        assert_eq!(FailureKind::from_status(429), Some(FailureKind::RateLimited));
        assert_eq!(FailureKind::from_status(403), Some(FailureKind::Authentication));
        assert_eq!(FailureKind::from_status(404), Some(FailureKind::ModelNotFound));
        assert_eq!(FailureKind::from_status(504), Some(FailureKind::Timeout));
        assert_eq!(FailureKind::from_status(500), None);
    }

    #[test]
    fn test_classify_messages() {
        assert_eq!(
            FailureKind::classify("The model is overloaded. Please try again later."),
            FailureKind::Overloaded
        );
        assert_eq!(
            FailureKind::classify("RESOURCE_EXHAUSTED: quota exceeded"),
            FailureKind::RateLimited
        );
        assert_eq!(
            FailureKind::classify("API key not valid. Please pass a valid API key."),
            FailureKind::Authentication
        );
        assert_eq!(
            FailureKind::classify("models/gemini-9 is not found for API version v1beta"),
            FailureKind::ModelNotFound
        );
        assert_eq!(FailureKind::classify("operation timed out"), FailureKind::Timeout);
        assert_eq!(
            FailureKind::classify("error trying to connect: dns error"),
            FailureKind::Network
        );
        assert_eq!(FailureKind::classify("something odd"), FailureKind::Unknown);
    }

    #[test]
    fn test_retry_policy() {
        assert!(FailureKind::Overloaded.is_retryable());
        assert!(FailureKind::EmptyResponse.is_retryable());
        assert!(!FailureKind::Authentication.is_retryable());
        assert!(!FailureKind::ModelNotFound.is_retryable());

        assert!(FailureKind::Overloaded.uses_extended_backoff());
        assert!(FailureKind::RateLimited.uses_extended_backoff());
        assert!(!FailureKind::Timeout.uses_extended_backoff());
    }

    #[test]
    fn test_display_is_user_message() {
        assert_eq!(FailureKind::RateLimited.to_string(), "Rate limit exceeded");
    }
}
