//! Run Ensemble use case
//!
//! Queries every worker in parallel and accepts their agreed answer, or asks
//! the judge once when they split.

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::error::AnswerError;
use crate::use_cases::invoke_model::ModelInvoker;
use crate::use_cases::shared::{ReconcileInput, query_in_parallel};
use quizquorum_domain::quorum::{decide_workers, resolve_split};
use quizquorum_domain::{ModelRoster, Phase, QuorumRule, Resolution, WorkerVerdict};
use tracing::info;

/// Use case for ensemble voting with judge tie-break
pub struct RunEnsembleUseCase<G: LlmGateway + 'static> {
    invoker: ModelInvoker<G>,
    roster: ModelRoster,
    rule: QuorumRule,
}

impl<G: LlmGateway + 'static> RunEnsembleUseCase<G> {
    pub fn new(invoker: ModelInvoker<G>, roster: ModelRoster, rule: QuorumRule) -> Self {
        Self {
            invoker,
            roster,
            rule,
        }
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

        let workers = query_in_parallel(
            &self.invoker,
            &self.roster.workers,
            &input.request,
            Phase::Workers,
            progress,
        )
        .await;

        if let WorkerVerdict::Agreed(resolution) =
            decide_workers(&workers, &input.options, &self.rule)
        {
            info!(
                answer = %resolution.answer,
                confidence = resolution.confidence,
                method = %resolution.method,
                "Workers agreed"
            );
            return Ok(resolution);
        }

        let judge = &self.roster.judge;
        info!(judge = %judge, "Workers split, consulting judge");
        progress.on_phase_start(&Phase::Judge, 1);
        let verdict = self.invoker.invoke(judge, &input.request).await;
        progress.on_task_complete(&Phase::Judge, &verdict.model, verdict.success);
        progress.on_phase_complete(&Phase::Judge);

        resolve_split(Some(&verdict), &workers, &input.options).map_err(|e| {
            let mut all = workers.clone();
            all.push(verdict.clone());
            AnswerError::from_domain(e, &all)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionParams;
    use crate::test_support::{ScriptedGateway, overloaded, unauthorized};
    use quizquorum_domain::{AnswerOption, GenerationRequest, Model, ResolutionMethod};
    use std::sync::Arc;

    fn input() -> ReconcileInput {
        ReconcileInput::new(GenerationRequest::new("Question:\nPick"), vec![])
    }

    fn use_case(gateway: &Arc<ScriptedGateway>) -> RunEnsembleUseCase<ScriptedGateway> {
        let invoker = ModelInvoker::new(Arc::clone(gateway), ExecutionParams::default());
        RunEnsembleUseCase::new(invoker, ModelRoster::default(), QuorumRule::Majority)
    }

    #[tokio::test(start_paused = true)]
    async fn test_majority_skips_judge() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .answers(Model::Gemini25Flash, "A", 90)
                .answers(Model::Gemini25FlashLite, "A", 80)
                .answers(Model::Gemini20Flash, "B", 70)
                .answers(Model::Gemini25Pro, "C", 99),
        );

        let resolution = use_case(&gateway).execute(&input()).await.unwrap();

        assert_eq!(resolution.answer, "A");
        assert_eq!(resolution.confidence, 85);
        assert_eq!(resolution.method, ResolutionMethod::Majority);
        assert_eq!(gateway.calls(&Model::Gemini25Pro), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unanimous() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .answers(Model::Gemini25Flash, "C", 60)
                .answers(Model::Gemini25FlashLite, "C", 70)
                .answers(Model::Gemini20Flash, "C", 80),
        );

        let resolution = use_case(&gateway).execute(&input()).await.unwrap();

        assert_eq!(resolution.answer, "C");
        assert_eq!(resolution.confidence, 70);
        assert_eq!(resolution.method, ResolutionMethod::Unanimous);
    }

    #[tokio::test(start_paused = true)]
    async fn test_split_consults_judge_once() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .answers(Model::Gemini25Flash, "A", 90)
                .answers(Model::Gemini25FlashLite, "B", 80)
                .answers(Model::Gemini20Flash, "C", 70)
                .answers(Model::Gemini25Pro, "D", 95),
        );

        let resolution = use_case(&gateway).execute(&input()).await.unwrap();

        assert_eq!(resolution.answer, "D");
        assert_eq!(resolution.confidence, 95);
        assert_eq!(resolution.method, ResolutionMethod::Judge);
        assert_eq!(gateway.calls(&Model::Gemini25Pro), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_judge_uses_best_worker() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .answers(Model::Gemini25Flash, "A", 60)
                .answers(Model::Gemini25FlashLite, "B", 85)
                .fails(Model::Gemini20Flash, unauthorized())
                .fails(Model::Gemini25Pro, unauthorized()),
        );

        let resolution = use_case(&gateway).execute(&input()).await.unwrap();

        assert_eq!(resolution.answer, "B");
        assert_eq!(resolution.method, ResolutionMethod::FallbackWorker);
        assert_eq!(resolution.models, vec![Model::Gemini25FlashLite]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_everything_failed() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .fails(Model::Gemini25Flash, overloaded())
                .fails(Model::Gemini25FlashLite, unauthorized())
                .fails(Model::Gemini20Flash, unauthorized())
                .fails(Model::Gemini25Pro, unauthorized()),
        );

        let err = use_case(&gateway).execute(&input()).await.unwrap_err();

        assert!(err.is_all_failed());
        assert!(err.to_string().contains("gemini-2.5-flash: Model server is overloaded"));
        assert_eq!(gateway.calls(&Model::Gemini25Flash), 3);
        assert_eq!(gateway.calls(&Model::Gemini25Pro), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_option_text_answers_count_as_agreement() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .answers(Model::Gemini25Flash, "Paris", 70)
                .answers(Model::Gemini25FlashLite, "A", 90)
                .answers(Model::Gemini20Flash, "B", 50),
        );
        let input = ReconcileInput::new(
            GenerationRequest::new("Question:\nCapital of France?"),
            vec![AnswerOption::new("A", "Paris"), AnswerOption::new("B", "Rome")],
        );

        let resolution = use_case(&gateway).execute(&input).await.unwrap();

        assert_eq!(resolution.answer, "A");
        assert_eq!(resolution.method, ResolutionMethod::Majority);
    }

    #[tokio::test]
    async fn test_no_workers() {
        let gateway = Arc::new(ScriptedGateway::new());
        let invoker = ModelInvoker::new(Arc::clone(&gateway), ExecutionParams::default());
        let use_case = RunEnsembleUseCase::new(
            invoker,
            ModelRoster::default().with_workers(vec![]),
            QuorumRule::Majority,
        );
        assert_eq!(use_case.execute(&input()).await, Err(AnswerError::NoModels));
    }
}
