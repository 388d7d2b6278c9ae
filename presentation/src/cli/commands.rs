//! CLI command definitions

use clap::{Parser, ValueEnum};
use quizquorum_domain::{OutputFormat, QuestionType, VotingStrategy};
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Colored summary with a low-confidence warning
    Text,
    /// One JSON object per question
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Question type for `--option` questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuestionTypeArg {
    /// Multi-select: every correct option must be chosen
    Checkbox,
    /// Drop-down: exactly one option
    Select,
    /// Radio buttons: exactly one option
    SingleChoice,
}

impl From<QuestionTypeArg> for QuestionType {
    fn from(arg: QuestionTypeArg) -> Self {
        match arg {
            QuestionTypeArg::Checkbox => QuestionType::Checkbox,
            QuestionTypeArg::Select => QuestionType::Select,
            QuestionTypeArg::SingleChoice => QuestionType::SingleChoice,
        }
    }
}

/// How split workers are settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Ask the judge model once
    Judge,
    /// Confidence-weighted choice, no judge
    Weighted,
}

impl From<StrategyArg> for VotingStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Judge => VotingStrategy::Judge,
            StrategyArg::Weighted => VotingStrategy::Weighted,
        }
    }
}

/// CLI arguments for quizquorum
#[derive(Parser, Debug)]
#[command(name = "quizquorum")]
#[command(author, version, about = "Answer multiple-choice questions with a quorum of LLMs")]
#[command(long_about = r#"
quizquorum asks several LLMs the same multiple-choice question and reconciles
their answers into one answer with a confidence score.

Reconciliation modes:
1. Ensemble (default): workers answer in parallel; if they split, a judge decides
2. Weighted (--strategy weighted): confidence-weighted choice among workers
3. Failover (--no-ensemble): models are tried one at a time until one answers

Configuration files are loaded from (in priority order):
1. QUIZQUORUM_* environment variables
2. --config <path>          Explicit config file
3. ./quizquorum.toml        Project-level config
4. ~/.config/quizquorum/config.toml   Global config

Example:
  quizquorum "Is Rust memory safe without a garbage collector? true/false"
  quizquorum "Capital of France?" --option A=Paris --option B=Rome --option C=Madrid
  quizquorum --json '{"question": "Pick primes", "options": [{"label": "A", "text": "2"}, {"label": "B", "text": "4"}], "type": "checkbox"}'
  quizquorum --batch questions.json -o json
"#)]
pub struct Cli {
    /// The question to answer
    pub question: Option<String>,

    /// Answer option as LABEL=TEXT (can be specified multiple times)
    #[arg(long = "option", value_name = "LABEL=TEXT")]
    pub options: Vec<String>,

    /// Question type when options are given
    #[arg(long = "type", value_enum, value_name = "TYPE")]
    pub question_type: Option<QuestionTypeArg>,

    /// Question number shown to the models
    #[arg(long, value_name = "N")]
    pub number: Option<u32>,

    /// Full question input as JSON (string or structured object)
    #[arg(long, value_name = "JSON", conflicts_with_all = ["question", "batch"])]
    pub json: Option<String>,

    /// JSON file with an array of question inputs, answered concurrently
    #[arg(long, value_name = "FILE", conflicts_with = "question")]
    pub batch: Option<PathBuf>,

    /// Worker models (can be specified multiple times)
    #[arg(short, long = "worker", value_name = "MODEL")]
    pub workers: Vec<String>,

    /// Judge model for split votes
    #[arg(long, value_name = "MODEL")]
    pub judge: Option<String>,

    /// Use the sequential failover chain instead of voting
    #[arg(long)]
    pub no_ensemble: bool,

    /// How split workers are settled
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Attempts per model call, including the first
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormatArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_structured_flags() {
        let cli = Cli::try_parse_from([
            "quizquorum",
            "Capital of France?",
            "--option",
            "A=Paris",
            "--option",
            "B=Rome",
            "--type",
            "single-choice",
            "-w",
            "gemini-2.0-flash",
            "--no-ensemble",
            "-o",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.question.as_deref(), Some("Capital of France?"));
        assert_eq!(cli.options, vec!["A=Paris", "B=Rome"]);
        assert_eq!(cli.question_type, Some(QuestionTypeArg::SingleChoice));
        assert_eq!(cli.workers, vec!["gemini-2.0-flash"]);
        assert!(cli.no_ensemble);
        assert_eq!(cli.output, Some(OutputFormatArg::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_json_conflicts_with_question() {
        let result = Cli::try_parse_from(["quizquorum", "q", "--json", "\"q\""]);
        assert!(result.is_err());
    }
}
