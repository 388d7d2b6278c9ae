//! CLI entrypoint for quizquorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use quizquorum_application::{
    AnswerConfig, AnswerLogger, AnswerService, NoProgress, ProgressNotifier,
};
use quizquorum_domain::{ConfigIssue, Model, OutputFormat, ReconcileMode, VotingStrategy};
use quizquorum_infrastructure::{ConfigLoader, FileConfig, GeminiGateway, JsonlAnswerLogger};
use quizquorum_presentation::{Cli, ConsoleFormatter, ProgressReporter};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    // Decode questions before any network setup so bad input fails fast
    let questions = cli.question_inputs()?;

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };
    let warnings = file_config.check()?;
    report_issues(&warnings);

    let config = apply_overrides(&cli, &file_config);
    let issues = config.validate();
    report_issues(&issues);
    if AnswerConfig::has_errors(&issues) {
        bail!("configuration cannot be used, fix the errors above");
    }

    let format = cli
        .output
        .map(OutputFormat::from)
        .unwrap_or_else(|| file_config.output.parse_format().0);
    if !file_config.output.color {
        colored::control::set_override(false);
    }

    info!(
        mode = %config.mode(),
        workers = config.models().workers.len(),
        questions = questions.len(),
        "Starting quizquorum"
    );

    // === Dependency Injection ===
    let gateway = Arc::new(
        GeminiGateway::from_config(&file_config.providers.gemini)
            .context("failed to set up the Gemini client")?,
    );

    let progress: Arc<dyn ProgressNotifier> = if cli.quiet || format == OutputFormat::Json {
        Arc::new(NoProgress)
    } else {
        Arc::new(ProgressReporter::new())
    };

    let threshold = config.confidence_threshold();
    let mut service = AnswerService::from_gateway(gateway, config).with_progress(progress);
    if let Some(path) = &file_config.logging.answer_log {
        match JsonlAnswerLogger::new(path) {
            Some(logger) => {
                let logger: Arc<dyn AnswerLogger> = Arc::new(logger);
                service = service.with_logger(logger);
            }
            None => warn!(path = %path.display(), "Answer log disabled"),
        }
    }
    service.start();

    // The queue resolves one question at a time; duplicates share a result
    let results =
        futures::future::join_all(questions.iter().cloned().map(|q| service.answer(q))).await;

    let formatter = ConsoleFormatter::new(threshold);
    let mut failures = 0;
    for (question, result) in questions.iter().zip(results) {
        let rendered = match (&result, format) {
            (Ok(outcome), OutputFormat::Text) => formatter.format(question, outcome),
            (Ok(outcome), OutputFormat::Json) => formatter.format_json(question, outcome),
            (Err(e), OutputFormat::Text) => formatter.format_error(question, e),
            (Err(e), OutputFormat::Json) => formatter.format_error_json(question, e),
        };
        if result.is_err() {
            failures += 1;
        }
        println!("{}", rendered.trim_end());
    }

    if failures > 0 {
        warn!(failures, total = questions.len(), "Some questions could not be answered");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Console logging filtered by `-v` (or `RUST_LOG`), plus an optional
/// plain-text copy written to `log_file`.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("log file path has no file name: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Layer command-line flags over the loaded configuration
fn apply_overrides(cli: &Cli, file: &FileConfig) -> AnswerConfig {
    let mut config = file.to_answer_config();

    let mut roster = config.models().clone();
    if !cli.workers.is_empty() {
        roster = roster.with_workers(cli.workers.iter().map(|w| Model::from_id(w)).collect());
    }
    if let Some(judge) = &cli.judge {
        roster = roster.with_judge(Model::from_id(judge));
    }
    config = config.with_models(roster);

    if cli.no_ensemble || cli.strategy.is_some() {
        let ensemble = file.answer.ensemble && !cli.no_ensemble;
        let strategy = cli
            .strategy
            .map(VotingStrategy::from)
            .unwrap_or_else(|| file.answer.parse_strategy().0);
        config = config.with_mode(ReconcileMode::from_settings(ensemble, strategy));
    }

    if let Some(attempts) = cli.max_attempts {
        let execution = config.execution().clone().with_max_attempts(attempts);
        config = config.with_execution(execution);
    }

    config
}

fn report_issues(issues: &[ConfigIssue]) {
    for issue in issues {
        if issue.is_error() {
            eprintln!("error: {}", issue.message);
        } else {
            eprintln!("warning: {}", issue.message);
        }
    }
}
