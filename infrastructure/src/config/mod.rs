//! Configuration file loading for quizquorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `QUIZQUORUM_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./quizquorum.toml` or `./.quizquorum.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/quizquorum/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAnswerConfig, FileConfig, FileExecutionConfig, FileGeminiConfig,
    FileLoggingConfig, FileModelsConfig, FileOutputConfig, FileOutputFormat, FileProvidersConfig,
};
pub use loader::ConfigLoader;
