//! Per-model results and vote tallies
//!
//! A [`ModelResult`] is the immutable outcome of one model invocation. A
//! [`VoteTally`] groups successful results by answer for one voting round.

use crate::core::failure::FailureKind;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Outcome of invoking one model (after retries)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelResult {
    pub model: Model,
    pub success: bool,
    /// Parsed answer, present on success
    pub answer: Option<String>,
    /// 0..=100, present on success
    pub confidence: Option<u8>,
    /// Classified failure, present on failure
    pub failure: Option<FailureKind>,
    /// Human-readable failure message
    pub error: Option<String>,
    /// Attempts made, including the successful one
    pub attempts: u32,
}

impl ModelResult {
    pub fn success(model: Model, answer: impl Into<String>, confidence: u8) -> Self {
        Self {
            model,
            success: true,
            answer: Some(answer.into()),
            confidence: Some(confidence.min(100)),
            failure: None,
            error: None,
            attempts: 1,
        }
    }

    pub fn failure(model: Model, kind: FailureKind) -> Self {
        Self {
            model,
            success: false,
            answer: None,
            confidence: None,
            failure: Some(kind),
            error: Some(kind.user_message().to_string()),
            attempts: 1,
        }
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Answer text, only for successful non-empty results
    pub fn usable_answer(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.answer.as_deref().filter(|a| !a.trim().is_empty())
    }

    pub fn confidence_or_zero(&self) -> u8 {
        self.confidence.unwrap_or(0)
    }

    /// `model: message` form used when every model failed
    pub fn failure_summary(&self) -> Option<String> {
        self.error
            .as_ref()
            .map(|error| format!("{}: {}", self.model, error))
    }
}

/// Supporters of one answer within a [`VoteTally`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyEntry {
    pub answer: String,
    pub count: usize,
    pub total_confidence: u32,
    pub models: Vec<Model>,
}

impl TallyEntry {
    pub fn average_confidence(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_confidence as f64 / self.count as f64
        }
    }

    /// Average confidence rounded to a whole percentage
    pub fn rounded_confidence(&self) -> u8 {
        self.average_confidence().round().clamp(0.0, 100.0) as u8
    }
}

/// Answers grouped with counts and confidences, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    entries: Vec<TallyEntry>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one vote
    pub fn add(&mut self, answer: impl Into<String>, confidence: u8, model: Model) {
        let answer = answer.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.answer == answer) {
            entry.count += 1;
            entry.total_confidence += u32::from(confidence);
            entry.models.push(model);
        } else {
            self.entries.push(TallyEntry {
                answer,
                count: 1,
                total_confidence: u32::from(confidence),
                models: vec![model],
            });
        }
    }

    /// Most supported answer; ties go to the higher average confidence,
    /// then to the answer seen first
    pub fn leader(&self) -> Option<&TallyEntry> {
        let mut best: Option<&TallyEntry> = None;
        for entry in &self.entries {
            best = match best {
                Some(current)
                    if entry.count < current.count
                        || (entry.count == current.count
                            && entry.average_confidence() <= current.average_confidence()) =>
                {
                    Some(current)
                }
                _ => Some(entry),
            };
        }
        best
    }

    pub fn entries(&self) -> &[TallyEntry] {
        &self.entries
    }

    /// Total votes recorded
    pub fn votes(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_groups_answers() {
        let mut tally = VoteTally::new();
        tally.add("A", 90, Model::Gemini25Flash);
        tally.add("A", 80, Model::Gemini25FlashLite);
        tally.add("B", 70, Model::Gemini20Flash);

        let leader = tally.leader().unwrap();
        assert_eq!(leader.answer, "A");
        assert_eq!(leader.count, 2);
        assert_eq!(leader.rounded_confidence(), 85);
        assert_eq!(leader.models, vec![Model::Gemini25Flash, Model::Gemini25FlashLite]);
        assert_eq!(tally.votes(), 3);
    }

    #[test]
    fn test_leader_tie_breaks_on_confidence() {
        let mut tally = VoteTally::new();
        tally.add("A", 60, Model::Gemini25Flash);
        tally.add("B", 90, Model::Gemini25FlashLite);
        assert_eq!(tally.leader().unwrap().answer, "B");
    }

    #[test]
    fn test_leader_full_tie_keeps_first_seen() {
        let mut tally = VoteTally::new();
        tally.add("C", 70, Model::Gemini25Flash);
        tally.add("A", 70, Model::Gemini25FlashLite);
        assert_eq!(tally.leader().unwrap().answer, "C");
    }

    #[test]
    fn test_empty_tally() {
        assert!(VoteTally::new().leader().is_none());
    }

    #[test]
    fn test_model_result_accessors() {
        let ok = ModelResult::success(Model::Gemini25Flash, "B", 120);
        assert_eq!(ok.usable_answer(), Some("B"));
        assert_eq!(ok.confidence, Some(100));

        let failed = ModelResult::failure(Model::Gemini25Pro, FailureKind::RateLimited).with_attempts(3);
        assert_eq!(failed.usable_answer(), None);
        assert_eq!(failed.attempts, 3);
        assert_eq!(
            failed.failure_summary().as_deref(),
            Some("gemini-2.5-pro: Rate limit exceeded")
        );
    }
}
