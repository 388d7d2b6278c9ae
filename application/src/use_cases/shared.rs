//! Shared pieces for the reconciliation use cases.
//!
//! Contains the per-question input and the parallel fan-out used by both the
//! ensemble and the weighted strategies.

use crate::config::ExecutionParams;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::invoke_model::ModelInvoker;
use quizquorum_domain::{
    AnswerOption, FailureKind, GenerationRequest, Model, ModelResult, Phase, PromptTemplate,
    QuestionInput,
};
use tokio::task::JoinSet;
use tracing::{info, warn};

/// One question, ready to send to models
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileInput {
    /// Prompt shared by workers, judge and failover models
    pub request: GenerationRequest,
    /// Options used to normalize answers
    pub options: Vec<AnswerOption>,
}

impl ReconcileInput {
    pub fn new(request: GenerationRequest, options: Vec<AnswerOption>) -> Self {
        Self { request, options }
    }

    /// Build the exam prompt for a question
    pub fn from_question(question: &QuestionInput, params: &ExecutionParams) -> Self {
        let request = GenerationRequest::new(PromptTemplate::exam_prompt(question))
            .with_system(PromptTemplate::exam_system())
            .with_max_output_tokens(params.max_output_tokens)
            .with_safety(params.safety);
        Self::new(request, question.options().to_vec())
    }
}

/// Invoke `models` concurrently and return their results in `models` order.
///
/// A task that panics is reported as an unknown failure for its model.
pub(crate) async fn query_in_parallel<G: LlmGateway + 'static>(
    invoker: &ModelInvoker<G>,
    models: &[Model],
    request: &GenerationRequest,
    phase: Phase,
    progress: &dyn ProgressNotifier,
) -> Vec<ModelResult> {
    info!("{}: querying {} models", phase, models.len());
    progress.on_phase_start(&phase, models.len());

    let mut join_set = JoinSet::new();
    for (index, model) in models.iter().enumerate() {
        let invoker = invoker.clone();
        let model = model.clone();
        let request = request.clone();

        join_set.spawn(async move {
            let result = invoker.invoke(&model, &request).await;
            (index, result)
        });
    }

    let mut slots: Vec<Option<ModelResult>> = vec![None; models.len()];
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, result)) => {
                progress.on_task_complete(&phase, &result.model, result.success);
                slots[index] = Some(result);
            }
            Err(e) => {
                warn!("Task join error: {}", e);
            }
        }
    }

    progress.on_phase_complete(&phase);

    slots
        .into_iter()
        .zip(models)
        .map(|(slot, model)| {
            slot.unwrap_or_else(|| ModelResult::failure(model.clone(), FailureKind::Unknown))
        })
        .collect()
}
