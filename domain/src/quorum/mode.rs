//! Reconciliation mode selection
//!
//! ```text
//! ensemble = true,  strategy = "judge"     → Ensemble  (workers + judge tie-break)
//! ensemble = true,  strategy = "weighted"  → Weighted  (confidence-weighted, no judge)
//! ensemble = false                          → Failover  (sequential, first success)
//! ```

use serde::{Deserialize, Serialize};

/// How disagreement between workers is settled in ensemble mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VotingStrategy {
    #[default]
    Judge,
    Weighted,
}

impl VotingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            VotingStrategy::Judge => "judge",
            VotingStrategy::Weighted => "weighted",
        }
    }
}

impl std::str::FromStr for VotingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "judge" => Ok(VotingStrategy::Judge),
            "weighted" => Ok(VotingStrategy::Weighted),
            other => Err(format!(
                "Unknown voting strategy: {}. Valid: judge, weighted",
                other
            )),
        }
    }
}

impl std::fmt::Display for VotingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reconciliation policy applied to each queued question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileMode {
    /// Parallel workers, judge on disagreement
    #[default]
    Ensemble,
    /// Parallel workers, confidence-weighted reconciliation
    Weighted,
    /// One model at a time until one succeeds
    Failover,
}

impl ReconcileMode {
    pub fn from_settings(ensemble: bool, strategy: VotingStrategy) -> Self {
        match (ensemble, strategy) {
            (false, _) => ReconcileMode::Failover,
            (true, VotingStrategy::Judge) => ReconcileMode::Ensemble,
            (true, VotingStrategy::Weighted) => ReconcileMode::Weighted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReconcileMode::Ensemble => "ensemble",
            ReconcileMode::Weighted => "weighted",
            ReconcileMode::Failover => "failover",
        }
    }

    /// Whether workers are queried in parallel
    pub fn is_parallel(&self) -> bool {
        !matches!(self, ReconcileMode::Failover)
    }
}

impl std::fmt::Display for ReconcileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings() {
        assert_eq!(
            ReconcileMode::from_settings(true, VotingStrategy::Judge),
            ReconcileMode::Ensemble
        );
        assert_eq!(
            ReconcileMode::from_settings(true, VotingStrategy::Weighted),
            ReconcileMode::Weighted
        );
        assert_eq!(
            ReconcileMode::from_settings(false, VotingStrategy::Weighted),
            ReconcileMode::Failover
        );
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("Weighted".parse::<VotingStrategy>(), Ok(VotingStrategy::Weighted));
        assert!("ranked".parse::<VotingStrategy>().is_err());
    }

    #[test]
    fn test_default_mode_is_ensemble() {
        assert_eq!(ReconcileMode::default(), ReconcileMode::Ensemble);
        assert!(!ReconcileMode::Failover.is_parallel());
    }
}
