//! Output formatter trait

use quizquorum_application::{AnswerError, AnswerOutcome};
use quizquorum_domain::QuestionInput;

/// Trait for formatting answered questions
pub trait OutputFormatter {
    /// Human-readable answer summary
    fn format(&self, question: &QuestionInput, outcome: &AnswerOutcome) -> String;

    /// Machine-readable answer
    fn format_json(&self, question: &QuestionInput, outcome: &AnswerOutcome) -> String;

    /// Human-readable failure
    fn format_error(&self, question: &QuestionInput, error: &AnswerError) -> String;

    /// Machine-readable failure
    fn format_error_json(&self, question: &QuestionInput, error: &AnswerError) -> String;
}
