//! Phases of one reconciliation run, reported to progress notifiers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Parallel worker queries
    Workers,
    /// Judge tie-break
    Judge,
    /// Sequential failover chain
    Failover,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Workers => "workers",
            Phase::Judge => "judge",
            Phase::Failover => "failover",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Workers => "Asking workers",
            Phase::Judge => "Consulting judge",
            Phase::Failover => "Trying models in order",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
