//! Question input decoding
//!
//! Turns command-line arguments into [`QuestionInput`]s: a plain question,
//! a question with `--option` flags, a `--json` input, or a `--batch` file.

use super::commands::Cli;
use quizquorum_domain::{AnswerOption, QuestionInput, QuestionType, StructuredQuestion};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("No question given. Pass a question, --json or --batch (see --help)")]
    Missing,

    #[error("Invalid option '{0}': expected LABEL=TEXT")]
    InvalidOption(String),

    #[error("--option, --type and --number need a question")]
    OptionsWithoutQuestion,

    #[error("Invalid question JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Could not read batch file {path}: {source}")]
    BatchRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Batch file {0} contains no questions")]
    EmptyBatch(PathBuf),
}

/// Parse one `LABEL=TEXT` option
pub fn parse_option(raw: &str) -> Result<AnswerOption, InputError> {
    let (label, text) = raw
        .split_once('=')
        .ok_or_else(|| InputError::InvalidOption(raw.to_string()))?;
    let (label, text) = (label.trim(), text.trim());
    if label.is_empty() || text.is_empty() {
        return Err(InputError::InvalidOption(raw.to_string()));
    }
    Ok(AnswerOption::new(label, text))
}

/// Decode a single JSON question: a string or a structured object
pub fn parse_json_input(raw: &str) -> Result<QuestionInput, InputError> {
    Ok(serde_json::from_str(raw)?)
}

/// Read a JSON array of question inputs
pub fn read_batch(path: &Path) -> Result<Vec<QuestionInput>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::BatchRead {
        path: path.to_path_buf(),
        source,
    })?;
    let inputs: Vec<QuestionInput> = serde_json::from_str(&content)?;
    if inputs.is_empty() {
        return Err(InputError::EmptyBatch(path.to_path_buf()));
    }
    Ok(inputs)
}

impl Cli {
    /// Every question this invocation asks, in input order
    pub fn question_inputs(&self) -> Result<Vec<QuestionInput>, InputError> {
        if let Some(raw) = &self.json {
            return Ok(vec![parse_json_input(raw)?]);
        }
        if let Some(path) = &self.batch {
            return read_batch(path);
        }

        let has_structure =
            !self.options.is_empty() || self.question_type.is_some() || self.number.is_some();
        let Some(question) = &self.question else {
            return Err(if has_structure {
                InputError::OptionsWithoutQuestion
            } else {
                InputError::Missing
            });
        };

        if !has_structure {
            return Ok(vec![QuestionInput::Plain(question.clone())]);
        }

        let options = self
            .options
            .iter()
            .map(|raw| parse_option(raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(vec![QuestionInput::Structured(StructuredQuestion {
            question: question.clone(),
            options,
            kind: self.question_type.map(QuestionType::from).unwrap_or_default(),
            number: self.number,
        })])
    }
}
