//! Model roles for one reconciliation setup

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Which models act as workers, judge and failover chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRoster {
    /// Queried in parallel, in configured order
    pub workers: Vec<Model>,
    /// Tie-breaker consulted when workers disagree
    pub judge: Model,
    /// Explicit failover order; empty means workers then judge
    pub failover: Vec<Model>,
}

impl Default for ModelRoster {
    fn default() -> Self {
        Self {
            workers: Model::default_workers(),
            judge: Model::default_judge(),
            failover: Vec::new(),
        }
    }
}

impl ModelRoster {
    pub fn new(workers: Vec<Model>, judge: Model) -> Self {
        Self {
            workers,
            judge,
            failover: Vec::new(),
        }
    }

    pub fn with_workers(mut self, workers: Vec<Model>) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_judge(mut self, judge: Model) -> Self {
        self.judge = judge;
        self
    }

    pub fn with_failover(mut self, failover: Vec<Model>) -> Self {
        self.failover = failover;
        self
    }

    /// First configured worker
    pub fn primary(&self) -> Option<&Model> {
        self.workers.first()
    }

    /// Second configured worker
    pub fn secondary(&self) -> Option<&Model> {
        self.workers.get(1)
    }

    /// Models tried by the failover chain, in order, without duplicates
    pub fn failover_order(&self) -> Vec<Model> {
        let candidates: Vec<&Model> = if self.failover.is_empty() {
            self.workers.iter().chain(std::iter::once(&self.judge)).collect()
        } else {
            self.failover.iter().collect()
        };

        let mut order: Vec<Model> = Vec::with_capacity(candidates.len());
        for model in candidates {
            if !order.contains(model) {
                order.push(model.clone());
            }
        }
        order
    }
}
