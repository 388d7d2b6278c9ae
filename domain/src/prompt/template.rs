//! Prompt templates for exam questions

use crate::core::question::{QuestionInput, QuestionType};

/// Templates for the single prompt shared by workers, judge and failover models
pub struct PromptTemplate;

impl PromptTemplate {
    /// System instruction sent alongside every exam prompt
    pub fn exam_system() -> &'static str {
        r#"You are an expert exam solver. Read each question carefully and pick the correct option(s).
Reply with a single JSON object and nothing else. Do not explain your reasoning."#
    }

    /// Build the user prompt for a question
    pub fn exam_prompt(input: &QuestionInput) -> String {
        let mut prompt = String::new();

        match input.number() {
            Some(number) => prompt.push_str(&format!("Question {}:\n", number)),
            None => prompt.push_str("Question:\n"),
        }
        prompt.push_str(input.text().trim());
        prompt.push('\n');

        let options = input.options();
        if options.is_empty() {
            prompt.push_str(
                r#"
Answer with the letter(s) of the correct option(s), or with true / false if it is a true/false statement.
"#,
            );
        } else {
            prompt.push_str("\nOptions:\n");
            for option in options {
                prompt.push_str(&format!("{}. {}\n", option.label.trim(), option.text.trim()));
            }
            prompt.push('\n');
            prompt.push_str(Self::type_instruction(input));
            prompt.push('\n');
        }

        prompt.push_str(
            r#"
Respond ONLY with JSON in this exact form:
{"answer": "<letters>", "confidence": <0-100>}
Use comma-separated letters for multiple answers (e.g. "A, C")."#,
        );

        prompt
    }

    fn type_instruction(input: &QuestionInput) -> &'static str {
        if input.is_true_false() {
            return "This is a true/false question. Choose the letter of the correct option.";
        }
        match input.kind() {
            QuestionType::Checkbox => {
                "Select ALL correct options. More than one option may be correct."
            }
            QuestionType::Select | QuestionType::SingleChoice => {
                "Select exactly ONE correct option."
            }
        }
    }
}
