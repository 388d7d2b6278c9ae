//! Final answer of one reconciliation run

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// How the final answer was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    /// Every worker agreed
    Unanimous,
    /// Enough workers agreed under the configured rule
    Majority,
    /// Workers disagreed and the judge decided
    Judge,
    /// Workers disagreed, the judge failed, best worker taken
    FallbackWorker,
    /// Weighted: two or more results agreed
    Consensus,
    /// Weighted: first configured worker's answer
    Primary,
    /// Weighted: second configured worker's answer
    Secondary,
    /// Weighted: highest-confidence result
    Fallback,
    /// Weighted: only one result succeeded
    Single,
    /// First success of the failover chain
    Failover,
}

impl ResolutionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionMethod::Unanimous => "unanimous",
            ResolutionMethod::Majority => "majority",
            ResolutionMethod::Judge => "judge",
            ResolutionMethod::FallbackWorker => "fallback_worker",
            ResolutionMethod::Consensus => "consensus",
            ResolutionMethod::Primary => "primary",
            ResolutionMethod::Secondary => "secondary",
            ResolutionMethod::Fallback => "fallback",
            ResolutionMethod::Single => "single",
            ResolutionMethod::Failover => "failover",
        }
    }

    /// Whether independent models agreed on the answer
    pub fn is_agreement(&self) -> bool {
        matches!(
            self,
            ResolutionMethod::Unanimous | ResolutionMethod::Majority | ResolutionMethod::Consensus
        )
    }
}

impl std::fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reconciled answer with the models that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub answer: String,
    pub confidence: u8,
    pub method: ResolutionMethod,
    /// Models whose answer was adopted
    pub models: Vec<Model>,
}

impl Resolution {
    pub fn new(
        answer: impl Into<String>,
        confidence: u8,
        method: ResolutionMethod,
        models: Vec<Model>,
    ) -> Self {
        Self {
            answer: answer.into(),
            confidence: confidence.min(100),
            method,
            models,
        }
    }
}
