//! Confidence-weighted reconciliation over any number of results
//!
//! Priority order once unreliable answers are penalized:
//!
//! 1. one successful result → `single`
//! 2. an exact answer shared by ≥2 results → `consensus`
//! 3. the first configured model, if reliable → `primary`
//! 4. the second configured model, if reliable → `secondary`
//! 5. the highest adjusted confidence → `fallback`

use super::resolution::{Resolution, ResolutionMethod};
use super::vote::{ModelResult, VoteTally};
use crate::answer::normalize::answer_letters;
use crate::core::error::DomainError;
use crate::core::model::Model;

/// Distinct letters at which an answer is considered confused
pub const UNRELIABLE_LETTER_COUNT: usize = 4;

/// Confidence ceiling for confused answers
pub const UNRELIABLE_CONFIDENCE_CAP: u8 = 40;

/// A successful result after the reliability penalty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedVote {
    pub model: Model,
    pub answer: String,
    pub confidence: u8,
    pub reliable: bool,
}

impl WeightedVote {
    /// Apply the penalty to a result; `None` for failed results
    pub fn from_result(result: &ModelResult) -> Option<Self> {
        let answer = result.usable_answer()?.trim().to_uppercase();
        let reliable = answer_letters(&answer).len() < UNRELIABLE_LETTER_COUNT;
        let confidence = if reliable {
            result.confidence_or_zero()
        } else {
            result.confidence_or_zero().min(UNRELIABLE_CONFIDENCE_CAP)
        };
        Some(Self {
            model: result.model.clone(),
            answer,
            confidence,
            reliable,
        })
    }

    fn into_resolution(self, method: ResolutionMethod) -> Resolution {
        Resolution::new(self.answer, self.confidence, method, vec![self.model])
    }
}

/// Reconcile results with the confidence-weighted rules.
///
/// `primary` and `secondary` are the first two configured models.
pub fn reconcile_weighted(
    results: &[ModelResult],
    primary: Option<&Model>,
    secondary: Option<&Model>,
) -> Result<Resolution, DomainError> {
    let votes: Vec<WeightedVote> = results.iter().filter_map(WeightedVote::from_result).collect();

    if votes.is_empty() {
        return Err(DomainError::AllModelsFailed);
    }
    if votes.len() == 1 {
        let vote = votes.into_iter().next().ok_or(DomainError::AllModelsFailed)?;
        return Ok(vote.into_resolution(ResolutionMethod::Single));
    }

    let mut tally = VoteTally::new();
    for vote in &votes {
        tally.add(vote.answer.clone(), vote.confidence, vote.model.clone());
    }
    if let Some(leader) = tally.leader()
        && leader.count >= 2
    {
        return Ok(Resolution::new(
            leader.answer.clone(),
            leader.rounded_confidence(),
            ResolutionMethod::Consensus,
            leader.models.clone(),
        ));
    }

    let reliable_from = |model: Option<&Model>| {
        let model = model?;
        votes.iter().find(|v| &v.model == model && v.reliable).cloned()
    };
    if let Some(vote) = reliable_from(primary) {
        return Ok(vote.into_resolution(ResolutionMethod::Primary));
    }
    if let Some(vote) = reliable_from(secondary) {
        return Ok(vote.into_resolution(ResolutionMethod::Secondary));
    }

    let best = votes
        .into_iter()
        .fold(None, |best: Option<WeightedVote>, v| match best {
            Some(b) if b.confidence >= v.confidence => Some(b),
            _ => Some(v),
        })
        .ok_or(DomainError::AllModelsFailed)?;
    Ok(best.into_resolution(ResolutionMethod::Fallback))
}
