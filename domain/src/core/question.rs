//! Question value objects and question identity
//!
//! A [`QuestionInput`] is what the outer surface hands to the core: either a
//! bare question string or a structured multiple-choice question. The
//! [`QuestionKey`] derived from it identifies duplicate submissions.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Characters removed from the end of a question before keying
const TRAILING_PUNCTUATION: &[char] = &['?', '.', '!', ':', ';', ',', '？', '。', '！', '：'];

/// One selectable option of a multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Option label as shown to the model (e.g. "A")
    pub label: String,
    /// Option text
    pub text: String,
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// How many options the question expects to be selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    /// Multi-select: every correct option must be chosen
    Checkbox,
    /// Drop-down selection of one option
    Select,
    /// Radio-style single answer
    #[default]
    #[serde(alias = "single_choice")]
    SingleChoice,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Checkbox => "checkbox",
            QuestionType::Select => "select",
            QuestionType::SingleChoice => "single-choice",
        }
    }

    /// Whether more than one option may be correct
    pub fn is_multi_select(&self) -> bool {
        matches!(self, QuestionType::Checkbox)
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "checkbox" => Ok(QuestionType::Checkbox),
            "select" => Ok(QuestionType::Select),
            "single-choice" | "single_choice" | "single" => Ok(QuestionType::SingleChoice),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A structured multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    #[serde(default, rename = "type")]
    pub kind: QuestionType,
    /// Position of the question within its exam, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

/// Question as received from the outer surface
///
/// Deserializes from either a JSON string or a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionInput {
    Plain(String),
    Structured(StructuredQuestion),
}

impl QuestionInput {
    /// Build a structured question
    pub fn structured(
        question: impl Into<String>,
        options: Vec<AnswerOption>,
        kind: QuestionType,
    ) -> Self {
        QuestionInput::Structured(StructuredQuestion {
            question: question.into(),
            options,
            kind,
            number: None,
        })
    }

    /// Question text as submitted
    pub fn text(&self) -> &str {
        match self {
            QuestionInput::Plain(text) => text,
            QuestionInput::Structured(q) => &q.question,
        }
    }

    /// Options, empty for plain questions
    pub fn options(&self) -> &[AnswerOption] {
        match self {
            QuestionInput::Plain(_) => &[],
            QuestionInput::Structured(q) => &q.options,
        }
    }

    pub fn kind(&self) -> QuestionType {
        match self {
            QuestionInput::Plain(_) => QuestionType::SingleChoice,
            QuestionInput::Structured(q) => q.kind,
        }
    }

    pub fn number(&self) -> Option<u32> {
        match self {
            QuestionInput::Plain(_) => None,
            QuestionInput::Structured(q) => q.number,
        }
    }

    /// Whether the options are exactly a "true"/"false" pair
    pub fn is_true_false(&self) -> bool {
        is_true_false_options(self.options())
    }

    /// Reject questions without any text
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.text().trim().is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question text is empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&str> for QuestionInput {
    fn from(s: &str) -> Self {
        QuestionInput::Plain(s.to_string())
    }
}

impl From<String> for QuestionInput {
    fn from(s: String) -> Self {
        QuestionInput::Plain(s)
    }
}

/// Whether a set of options is exactly one "true" and one "false" option
pub fn is_true_false_options(options: &[AnswerOption]) -> bool {
    if options.len() != 2 {
        return false;
    }
    let mut texts: Vec<String> = options.iter().map(|o| o.text.trim().to_lowercase()).collect();
    texts.sort();
    texts == ["false", "true"]
}

/// Identity of a question for deduplication
///
/// Two submissions with the same normalized text and the same options map to
/// the same key regardless of incidental whitespace or trailing punctuation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionKey(String);

impl QuestionKey {
    /// Derive the key for a question input
    pub fn from_input(input: &QuestionInput) -> Self {
        let mut key = normalize_text(input.text());
        let options = input.options();
        if !options.is_empty() {
            let serialized: Vec<String> = options
                .iter()
                .map(|o| format!("{}:{}", normalize_text(&o.label), normalize_text(&o.text)))
                .collect();
            key.push_str("||");
            key.push_str(&serialized.join("|"));
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Collapse whitespace runs and strip trailing punctuation
pub fn normalize_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(|c: char| TRAILING_PUNCTUATION.contains(&c) || c.is_whitespace())
        .to_string()
}
