//! Model roster configuration from TOML (`[models]` section)

use quizquorum_domain::{ConfigIssue, ConfigIssueCode, Model, ModelRoster};
use serde::{Deserialize, Serialize};

/// Model roster configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// workers = ["gemini-2.5-flash", "gemini-2.5-flash-lite", "gemini-2.0-flash"]
/// judge = "gemini-2.5-pro"      # breaks ties between workers
/// failover = []                 # empty = workers followed by judge
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Models queried in parallel
    pub workers: Vec<String>,
    /// Tie-break model
    pub judge: String,
    /// Explicit order for the failover chain
    pub failover: Vec<String>,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            workers: Model::default_workers()
                .iter()
                .map(|m| m.to_string())
                .collect(),
            judge: Model::default_judge().to_string(),
            failover: Vec::new(),
        }
    }
}

impl FileModelsConfig {
    /// Parse a model list, collecting issues for empty names.
    fn parse_model_list(field: &str, values: &[String]) -> (Vec<Model>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut models = Vec::new();
        for s in values {
            if s.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName,
                    format!("models.{}: model name cannot be empty in list", field),
                ));
            } else {
                models.push(Model::from_id(s.trim()));
            }
        }
        (models, issues)
    }

    pub fn parse_workers(&self) -> (Vec<Model>, Vec<ConfigIssue>) {
        Self::parse_model_list("workers", &self.workers)
    }

    pub fn parse_failover(&self) -> (Vec<Model>, Vec<ConfigIssue>) {
        Self::parse_model_list("failover", &self.failover)
    }

    /// Parse the judge, falling back to the default judge when blank
    pub fn parse_judge(&self) -> (Model, Vec<ConfigIssue>) {
        if self.judge.trim().is_empty() {
            let issue = ConfigIssue::error(
                ConfigIssueCode::EmptyModelName,
                "models.judge: model name cannot be empty",
            );
            return (Model::default_judge(), vec![issue]);
        }
        (Model::from_id(self.judge.trim()), Vec::new())
    }

    /// Build the roster, dropping blank names
    pub fn to_roster(&self) -> ModelRoster {
        let (workers, _) = self.parse_workers();
        let (judge, _) = self.parse_judge();
        let (failover, _) = self.parse_failover();
        ModelRoster::new(workers, judge).with_failover(failover)
    }

    /// Every issue found in the `[models]` section
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_workers().1;
        issues.extend(self.parse_judge().1);
        issues.extend(self.parse_failover().1);
        issues
    }
}
