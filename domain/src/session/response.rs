//! Model reply shapes.
//!
//! Providers return the generated text either directly or nested inside a
//! candidate / content-part structure. [`ModelReply`] models both shapes
//! explicitly and [`ModelReply::into_text`] extracts text with one function
//! per shape.
//!
//! ```text
//! Text { text }                       → text
//! Candidates { candidates, feedback } → first candidate with text, parts joined
//! neither yields text                 → EmptyReply diagnostic
//! ```

use crate::core::failure::FailureKind;
use serde::{Deserialize, Serialize};

/// Finish reasons that mean the provider withheld the output
const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

/// Safety assessment attached to a candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyRating {
    pub category: String,
    pub probability: String,
    #[serde(default)]
    pub blocked: bool,
}

/// One generated candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Text of each content part, in order
    pub parts: Vec<String>,
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

/// Feedback about the prompt itself (e.g. the whole prompt was blocked)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// A reply from a model capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ModelReply {
    /// Text embedded directly
    Text { text: String },
    /// Nested candidate / part structure
    Candidates {
        candidates: Vec<Candidate>,
        prompt_feedback: Option<PromptFeedback>,
    },
}

/// Why a reply carried no usable text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyReply {
    pub finish_reason: Option<String>,
    pub block_reason: Option<String>,
    pub blocked_categories: Vec<String>,
}

impl EmptyReply {
    /// Whether the provider's safety filter withheld the text
    pub fn is_blocked(&self) -> bool {
        self.block_reason.is_some()
            || !self.blocked_categories.is_empty()
            || self
                .finish_reason
                .as_deref()
                .is_some_and(|r| BLOCKING_FINISH_REASONS.contains(&r))
    }

    pub fn failure_kind(&self) -> FailureKind {
        if self.is_blocked() {
            FailureKind::SafetyBlocked
        } else {
            FailureKind::EmptyResponse
        }
    }
}

impl std::fmt::Display for EmptyReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "empty response")?;
        if let Some(reason) = &self.finish_reason {
            write!(f, " (finish reason: {})", reason)?;
        }
        if let Some(reason) = &self.block_reason {
            write!(f, " (blocked: {})", reason)?;
        }
        if !self.blocked_categories.is_empty() {
            write!(f, " (safety: {})", self.blocked_categories.join(", "))?;
        }
        Ok(())
    }
}

impl ModelReply {
    pub fn from_text(text: impl Into<String>) -> Self {
        ModelReply::Text { text: text.into() }
    }

    /// Extract the reply text, or explain why there is none
    pub fn into_text(self) -> Result<String, EmptyReply> {
        match self {
            ModelReply::Text { text } => text_from_field(text),
            ModelReply::Candidates {
                candidates,
                prompt_feedback,
            } => text_from_candidates(candidates, prompt_feedback),
        }
    }
}

fn text_from_field(text: String) -> Result<String, EmptyReply> {
    if text.trim().is_empty() {
        Err(EmptyReply::default())
    } else {
        Ok(text)
    }
}

fn text_from_candidates(
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
) -> Result<String, EmptyReply> {
    for candidate in &candidates {
        let text = candidate.parts.concat();
        if !text.trim().is_empty() {
            return Ok(text);
        }
    }

    let blocked_categories = candidates
        .iter()
        .flat_map(|c| c.safety_ratings.iter())
        .filter(|r| r.blocked)
        .map(|r| r.category.clone())
        .collect();

    Err(EmptyReply {
        finish_reason: candidates.first().and_then(|c| c.finish_reason.clone()),
        block_reason: prompt_feedback.and_then(|f| f.block_reason),
        blocked_categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(parts: &[&str], finish: Option<&str>) -> Candidate {
        Candidate {
            parts: parts.iter().map(|p| p.to_string()).collect(),
            finish_reason: finish.map(str::to_string),
            safety_ratings: Vec::new(),
        }
    }

    #[test]
    fn test_direct_text() {
        assert_eq!(ModelReply::from_text("B").into_text(), Ok("B".to_string()));
        assert_eq!(
            ModelReply::from_text("  \n").into_text(),
            Err(EmptyReply::default())
        );
    }

    #[test]
    fn test_candidate_parts_are_joined() {
        let reply = ModelReply::Candidates {
            candidates: vec![candidate(&["{\"answer\": ", "\"C\"}"], Some("STOP"))],
            prompt_feedback: None,
        };
        assert_eq!(reply.into_text(), Ok("{\"answer\": \"C\"}".to_string()));
    }

    #[test]
    fn test_first_candidate_with_text_wins() {
        let reply = ModelReply::Candidates {
            candidates: vec![candidate(&[], Some("MAX_TOKENS")), candidate(&["A"], None)],
            prompt_feedback: None,
        };
        assert_eq!(reply.into_text(), Ok("A".to_string()));
    }

    #[test]
    fn test_safety_block_diagnostic() {
        let mut blocked = candidate(&[], Some("SAFETY"));
        blocked.safety_ratings.push(SafetyRating {
            category: "HARM_CATEGORY_DANGEROUS_CONTENT".to_string(),
            probability: "HIGH".to_string(),
            blocked: true,
        });
        let reply = ModelReply::Candidates {
            candidates: vec![blocked],
            prompt_feedback: None,
        };
        let empty = reply.into_text().unwrap_err();
        assert!(empty.is_blocked());
        assert_eq!(empty.failure_kind(), FailureKind::SafetyBlocked);
        assert_eq!(
            empty.to_string(),
            "empty response (finish reason: SAFETY) (safety: HARM_CATEGORY_DANGEROUS_CONTENT)"
        );
    }

    #[test]
    fn test_prompt_block_without_candidates() {
        let reply = ModelReply::Candidates {
            candidates: vec![],
            prompt_feedback: Some(PromptFeedback {
                block_reason: Some("OTHER".to_string()),
            }),
        };
        assert_eq!(
            reply.into_text().unwrap_err().failure_kind(),
            FailureKind::SafetyBlocked
        );
    }

    #[test]
    fn test_plain_empty_is_empty_response() {
        let reply = ModelReply::Candidates {
            candidates: vec![candidate(&[""], Some("STOP"))],
            prompt_feedback: None,
        };
        assert_eq!(
            reply.into_text().unwrap_err().failure_kind(),
            FailureKind::EmptyResponse
        );
    }
}
