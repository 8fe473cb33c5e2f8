//! Multiple-choice quiz block.
//!
//! A quiz always has at least two options, option ids are unique within the
//! quiz, and `correct_answer` always indexes an existing option. Every
//! operation checks before it mutates, so a rejected call leaves the block
//! as it was.

use super::data::Style;
use crate::config::QuizConfig;
use crate::error::{BuilderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Smallest number of choices a quiz can have.
pub const MIN_QUIZ_OPTIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizBlock {
    pub question: String,
    pub options: Vec<QuizOption>,
    pub correct_answer: usize,
    pub explanation: String,
    #[serde(flatten)]
    pub style: Style,
}

/// Result of checking a learner's answer in preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub selected: usize,
    pub correct_answer: usize,
    pub is_correct: bool,
    pub explanation: String,
}

impl QuizBlock {
    pub fn option_ids(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.id.as_str())
    }

    pub fn correct_option(&self) -> Option<&QuizOption> {
        self.options.get(self.correct_answer)
    }

    /// Appends an option labelled `Option N`, N being the new option count.
    pub fn add_option(&mut self, id: String, limits: &QuizConfig) -> Result<&QuizOption> {
        if self.options.len() >= limits.max_options {
            return Err(BuilderError::InvariantViolation(format!(
                "Quiz already has the maximum of {} options",
                limits.max_options
            )));
        }
        if self.options.iter().any(|o| o.id == id) {
            return Err(BuilderError::InvariantViolation(format!(
                "Duplicate quiz option id '{}'",
                id
            )));
        }

        let text = format!("Option {}", self.options.len() + 1);
        self.options.push(QuizOption { id, text });
        let last = self.options.len() - 1;
        Ok(&self.options[last])
    }

    pub fn update_option(&mut self, index: usize, text: String) -> Result<()> {
        let len = self.options.len();
        let option = self
            .options
            .get_mut(index)
            .ok_or(BuilderError::IndexOutOfRange { index, len })?;
        option.text = text;
        Ok(())
    }

    /// Removes the option at `index`.
    ///
    /// The correct answer keeps pointing at the same option when an earlier
    /// option is removed. When the correct option itself is removed it moves
    /// to the option that slid into its place, or to the new last option.
    pub fn remove_option(&mut self, index: usize, limits: &QuizConfig) -> Result<QuizOption> {
        let len = self.options.len();
        if index >= len {
            return Err(BuilderError::IndexOutOfRange { index, len });
        }
        let min = limits.min_options.max(MIN_QUIZ_OPTIONS);
        if len <= min {
            return Err(BuilderError::InvariantViolation(format!(
                "A quiz needs at least {} options",
                min
            )));
        }

        let removed = self.options.remove(index);
        let remaining = self.options.len();
        if index < self.correct_answer {
            self.correct_answer -= 1;
        } else if index == self.correct_answer {
            self.correct_answer = self.correct_answer.min(remaining - 1);
        }
        Ok(removed)
    }

    pub fn set_correct_answer(&mut self, index: usize) -> Result<()> {
        let len = self.options.len();
        if index >= len {
            return Err(BuilderError::IndexOutOfRange { index, len });
        }
        self.correct_answer = index;
        Ok(())
    }

    pub fn check_answer(&self, selected: usize) -> Result<QuizOutcome> {
        let len = self.options.len();
        if selected >= len {
            return Err(BuilderError::IndexOutOfRange { index: selected, len });
        }
        Ok(QuizOutcome {
            selected,
            correct_answer: self.correct_answer,
            is_correct: selected == self.correct_answer,
            explanation: self.explanation.clone(),
        })
    }

    pub fn validate(&self, limits: &QuizConfig) -> Result<()> {
        let min = limits.min_options.max(MIN_QUIZ_OPTIONS);
        if self.options.len() < min {
            return Err(BuilderError::InvariantViolation(format!(
                "A quiz needs at least {} options, found {}",
                min,
                self.options.len()
            )));
        }
        if self.options.len() > limits.max_options {
            return Err(BuilderError::InvariantViolation(format!(
                "A quiz allows at most {} options, found {}",
                limits.max_options,
                self.options.len()
            )));
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.id.as_str()) {
                return Err(BuilderError::InvariantViolation(format!(
                    "Duplicate quiz option id '{}'",
                    option.id
                )));
            }
        }

        if self.correct_answer >= self.options.len() {
            return Err(BuilderError::InvariantViolation(format!(
                "Correct answer {} does not reference one of {} options",
                self.correct_answer,
                self.options.len()
            )));
        }
        Ok(())
    }
}

/// Partial update of a quiz; replacing `options` swaps the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizPatch {
    pub question: Option<String>,
    pub options: Option<Vec<QuizOption>>,
    pub correct_answer: Option<usize>,
    pub explanation: Option<String>,
}

impl QuizPatch {
    pub(crate) fn apply(&self, quiz: &mut QuizBlock) {
        if let Some(question) = &self.question {
            quiz.question = question.clone();
        }
        if let Some(options) = &self.options {
            quiz.options = options.clone();
        }
        if let Some(correct) = self.correct_answer {
            quiz.correct_answer = correct;
        }
        if let Some(explanation) = &self.explanation {
            quiz.explanation = explanation.clone();
        }
    }
}
