//! Reconciler
//!
//! Dispatches one question to the reconciliation mode chosen by
//! configuration. Built once per process and shared by the queue worker.

use crate::config::AnswerConfig;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::error::AnswerError;
use crate::use_cases::invoke_model::ModelInvoker;
use crate::use_cases::run_ensemble::RunEnsembleUseCase;
use crate::use_cases::run_failover::RunFailoverUseCase;
use crate::use_cases::run_weighted::RunWeightedUseCase;
use crate::use_cases::shared::ReconcileInput;
use quizquorum_domain::{ReconcileMode, Resolution};
use std::sync::Arc;
use tracing::debug;

/// Mode dispatcher over the three reconciliation use cases
pub struct Reconciler<G: LlmGateway + 'static> {
    mode: ReconcileMode,
    ensemble: RunEnsembleUseCase<G>,
    weighted: RunWeightedUseCase<G>,
    failover: RunFailoverUseCase<G>,
}

impl<G: LlmGateway + 'static> Reconciler<G> {
    pub fn new(gateway: Arc<G>, config: &AnswerConfig) -> Self {
        let invoker = ModelInvoker::new(gateway, config.execution().clone());
        let roster = config.models().clone();
        Self {
            mode: config.mode(),
            ensemble: RunEnsembleUseCase::new(invoker.clone(), roster.clone(), config.rule()),
            weighted: RunWeightedUseCase::new(invoker.clone(), roster.clone()),
            failover: RunFailoverUseCase::new(invoker, roster),
        }
    }

    pub fn mode(&self) -> ReconcileMode {
        self.mode
    }

    /// Resolve one question with the configured mode
    pub async fn reconcile(
        &self,
        input: &ReconcileInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<Resolution, AnswerError> {
        debug!(mode = %self.mode, "Reconciling question");
        match self.mode {
            ReconcileMode::Ensemble => self.ensemble.execute_with_progress(input, progress).await,
            ReconcileMode::Weighted => self.weighted.execute_with_progress(input, progress).await,
            ReconcileMode::Failover => self.failover.execute_with_progress(input, progress).await,
        }
    }
}
