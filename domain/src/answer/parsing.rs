//! Answer extraction from free-form model output.
//!
//! Models are asked for `{"answer": "...", "confidence": N}` but routinely
//! wrap it in code fences, embed it in prose, or ignore the format
//! entirely. [`parse_answer`] tries a fixed sequence of increasingly
//! lenient strategies and stops at the first one that yields an answer.
//!
//! | Step | Shape | Confidence |
//! |------|-------|------------|
//! | 1 | whole text is JSON (code fences stripped) | reported, clamped, default 50 |
//! | 2 | first `{...}` containing `"answer"` | reported, clamped, default 50 |
//! | 3 | exactly `true` / `false` | 85 |
//! | 4 | only 1-6 separated letters A-F | 70 |
//! | 5 | labeled phrase (`Answer: B`) | 65 |
//! | 6 | short text (at most 10 chars) with 1-4 standalone letters A-F | 60 |
//!
//! Steps 4-6 work on the upper-cased text. Letters inside words never count,
//! so `"Answer B"` is `B` and `"FACE"` is no answer at all.
//!
//! Anything else yields an empty answer with confidence 0.

use super::normalize::{join_letters, single_letter_tokens};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Confidence assumed when a JSON reply omits or garbles it
pub const DEFAULT_JSON_CONFIDENCE: u8 = 50;

const BOOLEAN_CONFIDENCE: u8 = 85;
const LETTER_LIST_CONFIDENCE: u8 = 70;
const LABELED_CONFIDENCE: u8 = 65;
const SHORT_TEXT_CONFIDENCE: u8 = 60;

const SHORT_TEXT_MAX_CHARS: usize = 10;
const SHORT_TEXT_MAX_LETTERS: usize = 4;

static EMBEDDED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{[^{}]*"answer"[^{}]*\}"#).expect("valid regex"));

static LETTER_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-F](?:[\s,]+[A-F]){0,5}$").expect("valid regex"));

/// Matched against upper-cased text
static LABELED_ANSWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:ANSWERS?|ANS)\b[*_]*\s*(?:[:：\-]|IS)?\s*[*_]*\s*([A-F](?:\s*,\s*[A-F])*)\b",
    )
    .expect("valid regex")
});

/// Answer extracted from one model reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAnswer {
    /// Upper-cased answer, e.g. `"B"`, `"A, C"` or `"TRUE"`; empty on failure
    pub answer: String,
    /// 0..=100
    pub confidence: u8,
}

impl ParsedAnswer {
    pub fn new(answer: impl Into<String>, confidence: u8) -> Self {
        Self {
            answer: answer.into(),
            confidence: confidence.min(100),
        }
    }

    /// The "nothing usable" result
    pub fn empty() -> Self {
        Self {
            answer: String::new(),
            confidence: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.answer.trim().is_empty()
    }
}

/// Extract an answer and confidence from raw model text.
///
/// `None` (no text at all) and unrecognizable text both yield
/// [`ParsedAnswer::empty`], which callers treat as a failed attempt.
///
/// # Examples
///
/// ```
/// use quizquorum_domain::answer::parsing::parse_answer;
///
/// let parsed = parse_answer(Some(r#"{"answer": "b", "confidence": 90}"#));
/// assert_eq!(parsed.answer, "B");
/// assert_eq!(parsed.confidence, 90);
///
/// assert!(parse_answer(Some("I am not sure")).is_empty());
/// assert!(parse_answer(None).is_empty());
/// ```
pub fn parse_answer(raw: Option<&str>) -> ParsedAnswer {
    let Some(raw) = raw else {
        return ParsedAnswer::empty();
    };
    let text = strip_code_fences(raw);
    if text.is_empty() {
        return ParsedAnswer::empty();
    }

    if let Some(parsed) = parse_json_answer(text) {
        return parsed;
    }

    if let Some(m) = EMBEDDED_JSON.find(text)
        && let Some(parsed) = parse_json_answer(m.as_str())
    {
        return parsed;
    }

    if text.eq_ignore_ascii_case("true") {
        return ParsedAnswer::new("TRUE", BOOLEAN_CONFIDENCE);
    }
    if text.eq_ignore_ascii_case("false") {
        return ParsedAnswer::new("FALSE", BOOLEAN_CONFIDENCE);
    }

    let upper = text.to_uppercase();

    if LETTER_LIST.is_match(&upper) {
        let letters = collect_letters(&upper);
        return ParsedAnswer::new(join_letters(&letters), LETTER_LIST_CONFIDENCE);
    }

    if let Some(caps) = LABELED_ANSWER.captures(&upper)
        && let Some(group) = caps.get(1)
    {
        let letters = collect_letters(group.as_str());
        if !letters.is_empty() {
            return ParsedAnswer::new(join_letters(&letters), LABELED_CONFIDENCE);
        }
    }

    if text.chars().count() <= SHORT_TEXT_MAX_CHARS {
        let letters = single_letter_tokens(&upper);
        if (1..=SHORT_TEXT_MAX_LETTERS).contains(&letters.len()) {
            return ParsedAnswer::new(join_letters(&letters), SHORT_TEXT_CONFIDENCE);
        }
    }

    ParsedAnswer::empty()
}

/// Remove a surrounding markdown code fence (with optional language tag)
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse a JSON object carrying an `answer` field
fn parse_json_answer(text: &str) -> Option<ParsedAnswer> {
    let value: Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;

    let answer = match object.get("answer")? {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if answer.is_empty() {
        return None;
    }

    let confidence = object
        .get("confidence")
        .and_then(confidence_value)
        .unwrap_or(DEFAULT_JSON_CONFIDENCE);

    Some(ParsedAnswer::new(answer.to_uppercase(), confidence))
}

/// Read a confidence from a number or numeric string (`"85"`, `"85%"`)
fn confidence_value(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.clamp(0.0, 100.0).round() as u8)
}

/// Distinct upper-case letters A-F in `text`
fn collect_letters(text: &str) -> BTreeSet<char> {
    text.chars().filter(|c| ('A'..='F').contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_json_is_clamped() {
        let parsed = parse_answer(Some("```json\n{\"answer\":\"B\",\"confidence\":120}\n```"));
        assert_eq!(parsed, ParsedAnswer::new("B", 100));
    }

    #[test]
    fn test_json_defaults_confidence() {
        let parsed = parse_answer(Some(r#"{"answer": "c"}"#));
        assert_eq!(parsed, ParsedAnswer::new("C", DEFAULT_JSON_CONFIDENCE));

        let parsed = parse_answer(Some(r#"{"answer": "C", "confidence": "high"}"#));
        assert_eq!(parsed.confidence, DEFAULT_JSON_CONFIDENCE);
    }

    #[test]
    fn test_json_confidence_string_and_negative() {
        assert_eq!(
            parse_answer(Some(r#"{"answer": "A", "confidence": "80%"}"#)).confidence,
            80
        );
        assert_eq!(
            parse_answer(Some(r#"{"answer": "A", "confidence": -5}"#)).confidence,
            0
        );
    }

    #[test]
    fn test_json_array_and_bool_answers() {
        let parsed = parse_answer(Some(r#"{"answer": ["a", "c"], "confidence": 75}"#));
        assert_eq!(parsed, ParsedAnswer::new("A, C", 75));

        let parsed = parse_answer(Some(r#"{"answer": false, "confidence": 90}"#));
        assert_eq!(parsed, ParsedAnswer::new("FALSE", 90));
    }

    #[test]
    fn test_empty_json_answer_falls_through() {
        assert!(parse_answer(Some(r#"{"answer": "", "confidence": 99}"#)).is_empty());
    }

    #[test]
    fn test_embedded_json() {
        let text = "After careful thought: {\"answer\": \"D\", \"confidence\": 88} is my pick.";
        assert_eq!(parse_answer(Some(text)), ParsedAnswer::new("D", 88));
    }

    #[test]
    fn test_true_false() {
        assert_eq!(parse_answer(Some("True")), ParsedAnswer::new("TRUE", 85));
        assert_eq!(parse_answer(Some(" false\n")), ParsedAnswer::new("FALSE", 85));
    }

    #[test]
    fn test_letter_list() {
        assert_eq!(parse_answer(Some("b")), ParsedAnswer::new("B", 70));
        assert_eq!(parse_answer(Some("C, A, c")), ParsedAnswer::new("A, C", 70));
        assert_eq!(parse_answer(Some("A B D")), ParsedAnswer::new("A, B, D", 70));
    }

    #[test]
    fn test_labeled_phrase() {
        assert_eq!(
            parse_answer(Some("Answer: **A, C**")),
            ParsedAnswer::new("A, C", 65)
        );
        assert_eq!(
            parse_answer(Some("Reasoning first. The answer is B because of X.")),
            ParsedAnswer::new("B", 65)
        );
        assert_eq!(
            parse_answer(Some("**Answer:** D")),
            ParsedAnswer::new("D", 65)
        );
    }

    #[test]
    fn test_labeled_phrase_ignores_case_and_separator() {
        assert_eq!(parse_answer(Some("Answer: b")), ParsedAnswer::new("B", 65));
        assert_eq!(parse_answer(Some("Answer B")), ParsedAnswer::new("B", 65));
        assert_eq!(parse_answer(Some("Answer - C")), ParsedAnswer::new("C", 65));
        assert_eq!(parse_answer(Some("Ans: D")), ParsedAnswer::new("D", 65));
        assert_eq!(
            parse_answer(Some("the answer is a, c")),
            ParsedAnswer::new("A, C", 65)
        );
    }

    #[test]
    fn test_label_word_is_not_an_answer_letter() {
        // The capital A of "Answers" must not leak into the answer
        let parsed = parse_answer(Some("Answers?"));
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_short_word_of_option_letters_is_empty() {
        assert!(parse_answer(Some("FACE")).is_empty());
        assert!(parse_answer(Some("Bad")).is_empty());
    }

    #[test]
    fn test_short_text_is_case_insensitive() {
        assert_eq!(parse_answer(Some("(b)")), ParsedAnswer::new("B", 60));
        assert_eq!(parse_answer(Some("a & c.")), ParsedAnswer::new("A, C", 60));
    }

    #[test]
    fn test_short_text() {
        assert_eq!(parse_answer(Some("(B)")), ParsedAnswer::new("B", 60));
        assert_eq!(parse_answer(Some("A & C.")), ParsedAnswer::new("A, C", 60));
    }

    #[test]
    fn test_unrelated_text_is_empty() {
        assert_eq!(
            parse_answer(Some("blah blah unrelated text")),
            ParsedAnswer::empty()
        );
    }

    #[test]
    fn test_long_prose_letters_are_not_scanned() {
        // Stray capitals in prose must not turn into a multi-letter answer
        let text = "Considering Both Cases, Each Answer Fails Differently";
        assert!(parse_answer(Some(text)).is_empty());
    }

    #[test]
    fn test_missing_or_blank_input() {
        assert!(parse_answer(None).is_empty());
        assert!(parse_answer(Some("   ")).is_empty());
        assert!(parse_answer(Some("```\n```")).is_empty());
    }
}
