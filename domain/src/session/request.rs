//! Request sent to a model capability

use serde::{Deserialize, Serialize};

/// Default cap on generated tokens
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Content filtering requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyPolicy {
    /// Ask the provider not to block anything (exam content trips filters easily)
    #[default]
    Permissive,
    /// Leave the provider's defaults in place
    ProviderDefault,
}

/// One prompt to send to one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Optional system instruction
    pub system: Option<String>,
    pub max_output_tokens: u32,
    pub safety: SafetyPolicy,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            safety: SafetyPolicy::default(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }

    pub fn with_safety(mut self, safety: SafetyPolicy) -> Self {
        self.safety = safety;
        self
    }
}
