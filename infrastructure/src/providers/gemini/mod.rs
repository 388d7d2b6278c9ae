//! Gemini `generateContent` provider
//!
//! Sends one prompt per call and returns the raw reply shape; parsing and
//! retry policy live in the application layer.

mod gateway;
mod types;

pub use gateway::GeminiGateway;
