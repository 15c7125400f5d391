use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest number of options a question may offer.
pub const MIN_OPTIONS: usize = 2;

/// Largest number of options a question may offer.
pub const MAX_OPTIONS: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must have between 2 and 4 options, got {count}")]
    OptionCount { count: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("option {option:?} appears more than once")]
    DuplicateOption { option: String },

    #[error("correct answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },
}

//
// ─── QUESTION RECORD ───────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Records are validated once when built and never mutated afterwards. The
/// serialized shape uses the `question` / `options` / `answer` keys of the
/// question bank file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionDraft", into = "QuestionDraft")]
pub struct QuestionRecord {
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
}

impl QuestionRecord {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, the option count is outside
    /// `MIN_OPTIONS..=MAX_OPTIONS`, options repeat or are blank, or the correct
    /// answer is not one of the options.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();

        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len()) {
            return Err(QuestionError::OptionCount {
                count: options.len(),
            });
        }

        for (index, option) in options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(QuestionError::EmptyOption { index });
            }
            if options[..index].contains(option) {
                return Err(QuestionError::DuplicateOption {
                    option: option.clone(),
                });
            }
        }

        if !options.contains(&correct_answer) {
            return Err(QuestionError::AnswerNotInOptions {
                answer: correct_answer,
            });
        }

        Ok(Self {
            prompt,
            options,
            correct_answer,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Exact, case-sensitive comparison against the canonical answer.
    #[must_use]
    pub fn is_correct(&self, answer: Option<&str>) -> bool {
        answer == Some(self.correct_answer.as_str())
    }
}

/// Unvalidated wire shape of a question, shared by records and bank files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct QuestionDraft {
    #[serde(alias = "prompt")]
    pub(crate) question: String,
    pub(crate) options: Vec<String>,
    #[serde(alias = "correct_answer")]
    pub(crate) answer: String,
}

impl TryFrom<QuestionDraft> for QuestionRecord {
    type Error = QuestionError;

    fn try_from(draft: QuestionDraft) -> Result<Self, Self::Error> {
        Self::new(draft.question, draft.options, draft.answer)
    }
}

impl From<QuestionRecord> for QuestionDraft {
    fn from(record: QuestionRecord) -> Self {
        Self {
            question: record.prompt,
            options: record.options,
            answer: record.correct_answer,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
