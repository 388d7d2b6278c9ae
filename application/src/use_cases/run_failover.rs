//! Run Failover use case
//!
//! Tries each model of the failover order in turn and returns the first
//! success. Strictly sequential: no voting, no parallelism.

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::error::AnswerError;
use crate::use_cases::invoke_model::ModelInvoker;
use crate::use_cases::shared::ReconcileInput;
use quizquorum_domain::{
    ModelRoster, Phase, Resolution, ResolutionMethod, normalize_answer,
};
use tracing::{info, warn};

/// Use case for the sequential failover chain
pub struct RunFailoverUseCase<G: LlmGateway + 'static> {
    invoker: ModelInvoker<G>,
    roster: ModelRoster,
}

impl<G: LlmGateway + 'static> RunFailoverUseCase<G> {
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
        let order = self.roster.failover_order();
        if order.is_empty() {
            return Err(AnswerError::NoModels);
        }

        progress.on_phase_start(&Phase::Failover, order.len());
        let mut failures = Vec::new();

        for model in &order {
            let result = self.invoker.invoke(model, &input.request).await;
            progress.on_task_complete(&Phase::Failover, model, result.success);

            if let Some(answer) = result.usable_answer() {
                info!(model = %model, "Failover chain answered");
                progress.on_phase_complete(&Phase::Failover);
                return Ok(Resolution::new(
                    normalize_answer(answer, &input.options),
                    result.confidence_or_zero(),
                    ResolutionMethod::Failover,
                    vec![model.clone()],
                ));
            }

            warn!(model = %model, "Failover candidate failed, trying next");
            failures.push(result);
        }

        progress.on_phase_complete(&Phase::Failover);
        Err(AnswerError::all_failed(&failures))
    }
}
