//! Canonical answer form for vote counting.
//!
//! Different models phrase the same choice differently (`"B"`, `"b)"`,
//! `"Option B"`, the option text itself). Votes are tallied on the
//! normalized form so those count as agreement.

use crate::core::question::{AnswerOption, is_true_false_options};
use std::collections::BTreeSet;

/// Longest token read as a run of letters (e.g. `"ACD"`)
const MAX_LETTER_RUN: usize = 6;

/// Normalize a parsed answer against the question's options.
///
/// - `TRUE` / `FALSE` pass through.
/// - For a true/false option pair, a bare option label maps to that option's
///   boolean text (`"A"` → `"TRUE"`).
/// - Otherwise the sorted, deduplicated letters A-F are joined with `", "`.
/// - With no letters, an exact (case-insensitive) option text match yields
///   that option's label.
/// - Anything else is returned upper-cased.
pub fn normalize_answer(raw: &str, options: &[AnswerOption]) -> String {
    let trimmed = raw.trim();
    let upper = trimmed.to_uppercase();
    if upper == "TRUE" || upper == "FALSE" {
        return upper;
    }

    if is_true_false_options(options)
        && let Some(option) = options
            .iter()
            .find(|o| o.label.trim().eq_ignore_ascii_case(trimmed))
    {
        return option.text.trim().to_uppercase();
    }

    let letters = single_letter_tokens(&upper);
    if !letters.is_empty() {
        return join_letters(&letters);
    }

    if let Some(option) = options
        .iter()
        .find(|o| o.text.trim().to_lowercase() == trimmed.to_lowercase())
    {
        return option.label.trim().to_uppercase();
    }

    let run = letter_run(&upper);
    if !run.is_empty() {
        return join_letters(&run);
    }

    upper
}

/// Distinct option letters in a normalized or raw answer
pub fn answer_letters(answer: &str) -> BTreeSet<char> {
    let upper = answer.to_uppercase();
    let letters = single_letter_tokens(&upper);
    if letters.is_empty() {
        letter_run(&upper)
    } else {
        letters
    }
}

/// Join letters as `"A, C"`
pub fn join_letters(letters: &BTreeSet<char>) -> String {
    letters
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Letters A-F that appear as standalone tokens (`"B"`, `"B)"`, `"OPTION B"`)
pub(crate) fn single_letter_tokens(upper: &str) -> BTreeSet<char> {
    upper
        .split(|c: char| !c.is_alphanumeric())
        .filter_map(|token| {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if ('A'..='F').contains(&c) => Some(c),
                _ => None,
            }
        })
        .collect()
}

/// Letters of an answer that is one short token made only of A-F (`"ACD"`)
fn letter_run(upper: &str) -> BTreeSet<char> {
    let token = upper.trim();
    let len = token.chars().count();
    if len < 2 || len > MAX_LETTER_RUN || !token.chars().all(|c| ('A'..='F').contains(&c)) {
        return BTreeSet::new();
    }
    token.chars().collect()
}
