//! Output configuration from TOML (`[output]` section)

use quizquorum_domain::{ConfigIssue, ConfigIssueCode, OutputFormat};
use serde::{Deserialize, Serialize};

// Re-export OutputFormat from domain for convenience
pub use quizquorum_domain::OutputFormat as FileOutputFormat;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// "text" or "json"
    pub format: String,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// Parse the format, falling back to text on unknown values
    pub fn parse_format(&self) -> (OutputFormat, Vec<ConfigIssue>) {
        match self.format.parse() {
            Ok(format) => (format, Vec::new()),
            Err(e) => (
                OutputFormat::Text,
                vec![ConfigIssue::warning(
                    ConfigIssueCode::UnknownOutputFormat,
                    format!("output.format: {}, falling back to 'text'", e),
                )],
            ),
        }
    }
}
