//! Run Weighted use case
//!
//! Queries every worker in parallel and reconciles with the
//! confidence-weighted rules: confused many-letter answers are capped,
//! agreement wins, then the first and second configured workers, then the
//! most confident result. No judge round.

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::error::AnswerError;
use crate::use_cases::invoke_model::ModelInvoker;
use crate::use_cases::shared::{ReconcileInput, query_in_parallel};
use quizquorum_domain::quorum::reconcile_weighted;
use quizquorum_domain::{ModelResult, ModelRoster, Phase, Resolution, normalize_answer};
use tracing::info;

/// Use case for confidence-weighted reconciliation
pub struct RunWeightedUseCase<G: LlmGateway + 'static> {
    invoker: ModelInvoker<G>,
    roster: ModelRoster,
}

impl<G: LlmGateway + 'static> RunWeightedUseCase<G> {
    pub fn new(invoker: ModelInvoker<G>, roster: ModelRoster) -> Self {
        Self { invoker, roster }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: &ReconcileInput) -> Result<Resolution, AnswerError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: &ReconcileInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<Resolution, AnswerError> {
        if self.roster.workers.is_empty() {
            return Err(AnswerError::NoModels);
        }

        let results = query_in_parallel(
            &self.invoker,
            &self.roster.workers,
            &input.request,
            Phase::Workers,
            progress,
        )
        .await;

        // Exact-match grouping only makes sense on canonical answers
        let normalized: Vec<ModelResult> = results
            .iter()
            .cloned()
            .map(|mut result| {
                if let Some(answer) = result.answer.as_deref() {
                    result.answer = Some(normalize_answer(answer, &input.options));
                }
                result
            })
            .collect();

        let resolution =
            reconcile_weighted(&normalized, self.roster.primary(), self.roster.secondary())
                .map_err(|e| AnswerError::from_domain(e, &results))?;

        info!(
            answer = %resolution.answer,
            confidence = resolution.confidence,
            method = %resolution.method,
            "Weighted reconciliation settled"
        );
        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionParams;
    use crate::test_support::{ScriptedGateway, unauthorized};
    use quizquorum_domain::{GenerationRequest, Model, ResolutionMethod};
    use std::sync::Arc;

    fn input() -> ReconcileInput {
        ReconcileInput::new(GenerationRequest::new("Question:\nPick"), vec![])
    }

    fn use_case(gateway: &Arc<ScriptedGateway>) -> RunWeightedUseCase<ScriptedGateway> {
        let invoker = ModelInvoker::new(Arc::clone(gateway), ExecutionParams::default());
        RunWeightedUseCase::new(invoker, ModelRoster::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_consensus_never_calls_judge() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .answers(Model::Gemini25Flash, "A", 40)
                .answers(Model::Gemini25FlashLite, "B", 90)
                .answers(Model::Gemini20Flash, "b", 70),
        );

        let resolution = use_case(&gateway).execute(&input()).await.unwrap();

        assert_eq!(resolution.answer, "B");
        assert_eq!(resolution.confidence, 80);
        assert_eq!(resolution.method, ResolutionMethod::Consensus);
        assert_eq!(gateway.calls(&Model::Gemini25Pro), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confused_primary_yields_to_secondary() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .answers(Model::Gemini25Flash, "A, B, C, D, E", 99)
                .answers(Model::Gemini25FlashLite, "C", 60)
                .answers(Model::Gemini20Flash, "D", 90),
        );

        let resolution = use_case(&gateway).execute(&input()).await.unwrap();

        assert_eq!(resolution.answer, "C");
        assert_eq!(resolution.method, ResolutionMethod::Secondary);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_failed() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .fails(Model::Gemini25Flash, unauthorized())
                .fails(Model::Gemini25FlashLite, unauthorized())
                .fails(Model::Gemini20Flash, unauthorized()),
        );

        let err = use_case(&gateway).execute(&input()).await.unwrap_err();
        assert!(err.is_all_failed());
    }
}
