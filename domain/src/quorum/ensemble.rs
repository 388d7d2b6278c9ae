//! Ensemble voting with judge tie-break
//!
//! ```text
//! workers (parallel) ──▶ normalize ──▶ tally ──┬─▶ ≥2 agree + rule ─▶ unanimous / majority
//!                                              └─▶ otherwise ──▶ judge ──┬─▶ judge
//!                                                                        └─▶ fallback_worker
//! ```
//!
//! The functions here are pure: the caller runs the models and feeds the
//! [`ModelResult`]s in.

use super::resolution::{Resolution, ResolutionMethod};
use super::rule::QuorumRule;
use super::vote::{ModelResult, VoteTally};
use crate::answer::normalize::normalize_answer;
use crate::core::error::DomainError;
use crate::core::question::AnswerOption;

/// Fewest agreeing workers that can settle a question without the judge
pub const MIN_AGREEING_WORKERS: usize = 2;

/// Outcome of the worker round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerVerdict {
    /// Workers agreed; no judge needed
    Agreed(Resolution),
    /// No sufficient agreement (includes every worker failing)
    Split,
}

/// Tally successful worker results on their normalized answers
pub fn tally_results(results: &[ModelResult], options: &[AnswerOption]) -> VoteTally {
    let mut tally = VoteTally::new();
    for result in results {
        if let Some(answer) = result.usable_answer() {
            tally.add(
                normalize_answer(answer, options),
                result.confidence_or_zero(),
                result.model.clone(),
            );
        }
    }
    tally
}

/// Decide the worker round.
///
/// The leading answer wins when it has at least [`MIN_AGREEING_WORKERS`]
/// supporters and satisfies `rule` against the number of workers asked
/// (failed workers count toward the total).
pub fn decide_workers(
    results: &[ModelResult],
    options: &[AnswerOption],
    rule: &QuorumRule,
) -> WorkerVerdict {
    let tally = tally_results(results, options);
    let Some(leader) = tally.leader() else {
        return WorkerVerdict::Split;
    };

    let total = results.len();
    if leader.count < MIN_AGREEING_WORKERS || !rule.is_satisfied(leader.count, total) {
        return WorkerVerdict::Split;
    }

    let method = if leader.count == total {
        ResolutionMethod::Unanimous
    } else {
        ResolutionMethod::Majority
    };
    WorkerVerdict::Agreed(Resolution::new(
        leader.answer.clone(),
        leader.rounded_confidence(),
        method,
        leader.models.clone(),
    ))
}

/// Settle a split round from the judge's result.
///
/// A successful judge is authoritative. Otherwise the most confident
/// successful worker is used. Fails only when nobody succeeded.
pub fn resolve_split(
    judge: Option<&ModelResult>,
    workers: &[ModelResult],
    options: &[AnswerOption],
) -> Result<Resolution, DomainError> {
    if let Some(judge) = judge
        && let Some(answer) = judge.usable_answer()
    {
        return Ok(Resolution::new(
            normalize_answer(answer, options),
            judge.confidence_or_zero(),
            ResolutionMethod::Judge,
            vec![judge.model.clone()],
        ));
    }

    let best = most_confident(workers).ok_or(DomainError::AllModelsFailed)?;
    let answer = best.usable_answer().ok_or(DomainError::AllModelsFailed)?;
    Ok(Resolution::new(
        normalize_answer(answer, options),
        best.confidence_or_zero(),
        ResolutionMethod::FallbackWorker,
        vec![best.model.clone()],
    ))
}

/// Successful result with the highest confidence (first wins ties)
pub fn most_confident(results: &[ModelResult]) -> Option<&ModelResult> {
    results
        .iter()
        .filter(|r| r.usable_answer().is_some())
        .fold(None, |best: Option<&ModelResult>, r| match best {
            Some(b) if b.confidence_or_zero() >= r.confidence_or_zero() => Some(b),
            _ => Some(r),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::failure::FailureKind;
    use crate::core::model::Model;

    fn ok(model: Model, answer: &str, confidence: u8) -> ModelResult {
        ModelResult::success(model, answer, confidence)
    }

    fn failed(model: Model) -> ModelResult {
        ModelResult::failure(model, FailureKind::Overloaded)
    }

    #[test]
    fn test_majority_vote() {
        let results = vec![
            ok(Model::Gemini25Flash, "A", 90),
            ok(Model::Gemini25FlashLite, "A", 80),
            ok(Model::Gemini20Flash, "B", 70),
        ];
        let WorkerVerdict::Agreed(resolution) =
            decide_workers(&results, &[], &QuorumRule::Majority)
        else {
            panic!("expected agreement");
        };
        assert_eq!(resolution.answer, "A");
        assert_eq!(resolution.confidence, 85);
        assert_eq!(resolution.method, ResolutionMethod::Majority);
        assert_eq!(resolution.models.len(), 2);
    }

    #[test]
    fn test_unanimous_vote() {
        let results = vec![
            ok(Model::Gemini25Flash, "C", 60),
            ok(Model::Gemini25FlashLite, "c", 70),
            ok(Model::Gemini20Flash, "Option C", 80),
        ];
        let verdict = decide_workers(&results, &[], &QuorumRule::Majority);
        assert_eq!(
            verdict,
            WorkerVerdict::Agreed(Resolution::new(
                "C",
                70,
                ResolutionMethod::Unanimous,
                vec![Model::Gemini25Flash, Model::Gemini25FlashLite, Model::Gemini20Flash],
            ))
        );
    }

    #[test]
    fn test_normalization_merges_equivalent_answers() {
        let options = vec![AnswerOption::new("A", "Paris"), AnswerOption::new("B", "Rome")];
        let results = vec![
            ok(Model::Gemini25Flash, "PARIS", 70),
            ok(Model::Gemini25FlashLite, "A", 90),
            ok(Model::Gemini20Flash, "B", 99),
        ];
        let WorkerVerdict::Agreed(resolution) =
            decide_workers(&results, &options, &QuorumRule::Majority)
        else {
            panic!("expected agreement");
        };
        assert_eq!(resolution.answer, "A");
        assert_eq!(resolution.confidence, 80);
    }

    #[test]
    fn test_all_different_is_split() {
        let results = vec![
            ok(Model::Gemini25Flash, "A", 90),
            ok(Model::Gemini25FlashLite, "B", 80),
            ok(Model::Gemini20Flash, "C", 70),
        ];
        assert_eq!(
            decide_workers(&results, &[], &QuorumRule::Majority),
            WorkerVerdict::Split
        );
    }

    #[test]
    fn test_failed_workers_count_toward_total() {
        let results = vec![
            ok(Model::Gemini25Flash, "A", 90),
            ok(Model::Gemini25FlashLite, "A", 80),
            failed(Model::Gemini20Flash),
        ];
        let WorkerVerdict::Agreed(resolution) =
            decide_workers(&results, &[], &QuorumRule::Majority)
        else {
            panic!("expected agreement");
        };
        assert_eq!(resolution.method, ResolutionMethod::Majority);

        assert_eq!(
            decide_workers(&results, &[], &QuorumRule::Unanimous),
            WorkerVerdict::Split
        );
    }

    #[test]
    fn test_single_survivor_is_split() {
        let results = vec![
            ok(Model::Gemini25Flash, "A", 90),
            failed(Model::Gemini25FlashLite),
            failed(Model::Gemini20Flash),
        ];
        assert_eq!(
            decide_workers(&results, &[], &QuorumRule::Majority),
            WorkerVerdict::Split
        );
    }

    #[test]
    fn test_judge_is_authoritative() {
        let workers = vec![
            ok(Model::Gemini25Flash, "A", 90),
            ok(Model::Gemini25FlashLite, "B", 80),
            ok(Model::Gemini20Flash, "C", 70),
        ];
        let judge = ok(Model::Gemini25Pro, "D", 95);
        let resolution = resolve_split(Some(&judge), &workers, &[]).unwrap();
        assert_eq!(
            resolution,
            Resolution::new("D", 95, ResolutionMethod::Judge, vec![Model::Gemini25Pro])
        );
    }

    #[test]
    fn test_failed_judge_falls_back_to_best_worker() {
        let workers = vec![
            ok(Model::Gemini25Flash, "A", 60),
            ok(Model::Gemini25FlashLite, "B", 80),
            failed(Model::Gemini20Flash),
        ];
        let judge = failed(Model::Gemini25Pro);
        let resolution = resolve_split(Some(&judge), &workers, &[]).unwrap();
        assert_eq!(resolution.answer, "B");
        assert_eq!(resolution.confidence, 80);
        assert_eq!(resolution.method, ResolutionMethod::FallbackWorker);
    }

    #[test]
    fn test_everything_failed() {
        let workers = vec![failed(Model::Gemini25Flash), failed(Model::Gemini20Flash)];
        let judge = failed(Model::Gemini25Pro);
        assert_eq!(
            resolve_split(Some(&judge), &workers, &[]),
            Err(DomainError::AllModelsFailed)
        );
    }

    #[test]
    fn test_most_confident_prefers_first_on_tie() {
        let results = vec![
            ok(Model::Gemini25Flash, "A", 80),
            ok(Model::Gemini25FlashLite, "B", 80),
        ];
        assert_eq!(most_confident(&results).unwrap().model, Model::Gemini25Flash);
    }
}
