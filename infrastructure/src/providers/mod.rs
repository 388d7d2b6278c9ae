//! Model capability providers

pub mod gemini;

pub use gemini::GeminiGateway;
