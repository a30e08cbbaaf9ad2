//! Operator prompts

use crate::facets::{PromptError, Prompter};

/// Arrow-key selection on the terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn choose(&mut self, question: &str, options: &[String], default: Option<usize>) -> Result<usize, PromptError> {
        let mut select = dialoguer::Select::new().with_prompt(question).items(options);
        if let Some(default) = default {
            select = select.default(default);
        }
        select
            .interact()
            .map_err(|e| PromptError::Interaction(e.to_string()))
    }
}

/// Answers with the default, or fails when there is none.
pub struct NonInteractivePrompter;

impl Prompter for NonInteractivePrompter {
    fn choose(&mut self, question: &str, options: &[String], default: Option<usize>) -> Result<usize, PromptError> {
        match default {
            Some(index) => {
                if let Some(option) = options.get(index) {
                    tracing::info!(question, answer = %option, "using default answer");
                }
                Ok(index)
            }
            None => Err(PromptError::AnswerRequired {
                question: question.to_string(),
            }),
        }
    }
}
