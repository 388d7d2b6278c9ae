//! Wire types for the Gemini `generateContent` API
//!
//! Converts domain `GenerationRequest` into the request body, and the
//! response body (either reply shape) into domain `ModelReply`.

use quizquorum_domain::{
    Candidate, GenerationRequest, ModelReply, PromptFeedback, SafetyPolicy, SafetyRating,
};
use serde::{Deserialize, Serialize};

/// Harm categories relaxed under [`SafetyPolicy::Permissive`]
const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

// ─── Domain → Gemini ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<WireContent>,
    pub generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WirePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

impl WireContent {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![WirePart {
                text: Some(text.to_string()),
            }],
        }
    }
}

impl From<&GenerationRequest> for GenerateContentRequest {
    fn from(request: &GenerationRequest) -> Self {
        let safety_settings = match request.safety {
            SafetyPolicy::Permissive => HARM_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: "BLOCK_NONE",
                })
                .collect(),
            SafetyPolicy::ProviderDefault => Vec::new(),
        };

        Self {
            contents: vec![WireContent::text(Some("user"), &request.prompt)],
            system_instruction: request
                .system
                .as_deref()
                .map(|system| WireContent::text(None, system)),
            generation_config: GenerationConfig {
                max_output_tokens: request.max_output_tokens,
            },
            safety_settings,
        }
    }
}

// ─── Gemini → Domain ─────────────────────────────────────────────

/// Response body, in either shape a provider may return
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireReply {
    /// `{"text": "..."}`
    Text { text: String },
    /// `{"candidates": [...], "promptFeedback": {...}}`
    Candidates(GenerateContentResponse),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<WireCandidate>,
    #[serde(default)]
    pub prompt_feedback: Option<WirePromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCandidate {
    #[serde(default)]
    pub content: Option<WireContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub safety_ratings: Vec<WireSafetyRating>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireSafetyRating {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub probability: String,
    #[serde(default)]
    pub blocked: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// `{"error": {"code": 503, "message": "...", "status": "UNAVAILABLE"}}`
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<WireCandidate> for Candidate {
    fn from(candidate: WireCandidate) -> Self {
        Candidate {
            parts: candidate
                .content
                .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
                .unwrap_or_default(),
            finish_reason: candidate.finish_reason,
            safety_ratings: candidate
                .safety_ratings
                .into_iter()
                .map(|r| SafetyRating {
                    category: r.category,
                    probability: r.probability,
                    blocked: r.blocked,
                })
                .collect(),
        }
    }
}

impl From<WireReply> for ModelReply {
    fn from(reply: WireReply) -> Self {
        match reply {
            WireReply::Text { text } => ModelReply::Text { text },
            WireReply::Candidates(response) => ModelReply::Candidates {
                candidates: response.candidates.into_iter().map(Candidate::from).collect(),
                prompt_feedback: response.prompt_feedback.map(|f| PromptFeedback {
                    block_reason: f.block_reason,
                }),
            },
        }
    }
}
