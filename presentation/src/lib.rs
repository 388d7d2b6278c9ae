//! Presentation layer for quizquorum
//!
//! This crate contains CLI definitions, question input decoding, output
//! formatters, and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormatArg, QuestionTypeArg, StrategyArg};
pub use cli::input::InputError;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
