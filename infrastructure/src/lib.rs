//! Infrastructure layer for quizquorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig, FileOutputFormat};
pub use logging::JsonlAnswerLogger;
pub use providers::GeminiGateway;
