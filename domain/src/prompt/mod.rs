//! Prompt domain
//!
//! Templates for turning a question into model input.

mod template;

pub use template::PromptTemplate;
