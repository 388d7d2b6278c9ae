//! Console output formatter for answers

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use quizquorum_application::{AnswerError, AnswerOutcome};
use quizquorum_domain::QuestionInput;
use quizquorum_domain::core::string::truncate;
use serde_json::json;

/// Longest question text echoed back in the summary
const QUESTION_PREVIEW_CHARS: usize = 100;

/// Formats answers for console display
pub struct ConsoleFormatter {
    /// Answers below this confidence get a warning line
    confidence_threshold: u8,
}

impl ConsoleFormatter {
    pub fn new(confidence_threshold: u8) -> Self {
        Self {
            confidence_threshold,
        }
    }

    /// Format one answered question
    pub fn format(&self, question: &QuestionInput, outcome: &AnswerOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}\n",
            "Q:".bold(),
            Self::question_line(question)
        ));

        let answer_text = Self::answer_with_option_text(question, &outcome.answer);
        output.push_str(&format!(
            "{} {}  {}\n",
            "A:".bold(),
            answer_text.green().bold(),
            format!("({}% confidence)", outcome.confidence).dimmed()
        ));

        let source = if outcome.cached {
            "cached".to_string()
        } else {
            format!("{} ms", outcome.duration_ms)
        };
        let models = outcome
            .models
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!(
            "   {} {} {} {}\n",
            "via".dimmed(),
            outcome.method.to_string().cyan(),
            format!("[{}]", models).dimmed(),
            format!("({})", source).dimmed()
        ));

        if !outcome.is_confident(self.confidence_threshold) {
            output.push_str(&format!(
                "   {} confidence below {}%, double-check this answer\n",
                "!".yellow().bold(),
                self.confidence_threshold
            ));
        }

        output
    }

    /// Format as JSON
    pub fn format_json(&self, question: &QuestionInput, outcome: &AnswerOutcome) -> String {
        let value = json!({
            "question": question.text(),
            "answer": outcome.answer,
            "confidence": outcome.confidence,
            "confident": outcome.is_confident(self.confidence_threshold),
            "method": outcome.method,
            "models": outcome.models,
            "duration_ms": outcome.duration_ms,
            "cached": outcome.cached,
        });
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_error(&self, question: &QuestionInput, error: &AnswerError) -> String {
        format!(
            "{} {}\n{} {}\n",
            "Q:".bold(),
            Self::question_line(question),
            "Error:".red().bold(),
            error
        )
    }

    pub fn format_error_json(&self, question: &QuestionInput, error: &AnswerError) -> String {
        let value = json!({
            "question": question.text(),
            "error": error.to_string(),
        });
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn question_line(question: &QuestionInput) -> String {
        let text = truncate(question.text().trim(), QUESTION_PREVIEW_CHARS);
        match question.number() {
            Some(n) => format!("#{} {}", n, text),
            None => text,
        }
    }

    /// "A, C" becomes "A, C (Paris; Lyon)" when the options are known
    fn answer_with_option_text(question: &QuestionInput, answer: &str) -> String {
        let texts: Vec<&str> = answer
            .split(',')
            .map(str::trim)
            .filter_map(|label| {
                question
                    .options()
                    .iter()
                    .find(|o| o.label.eq_ignore_ascii_case(label))
                    .map(|o| o.text.as_str())
            })
            .collect();
        if texts.is_empty() {
            answer.to_string()
        } else {
            format!("{} ({})", answer, texts.join("; "))
        }
    }
}

impl Default for ConsoleFormatter {
    fn default() -> Self {
        Self::new(quizquorum_application::DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, question: &QuestionInput, outcome: &AnswerOutcome) -> String {
        ConsoleFormatter::format(self, question, outcome)
    }

    fn format_json(&self, question: &QuestionInput, outcome: &AnswerOutcome) -> String {
        ConsoleFormatter::format_json(self, question, outcome)
    }

    fn format_error(&self, question: &QuestionInput, error: &AnswerError) -> String {
        ConsoleFormatter::format_error(self, question, error)
    }

    fn format_error_json(&self, question: &QuestionInput, error: &AnswerError) -> String {
        ConsoleFormatter::format_error_json(self, question, error)
    }
}
