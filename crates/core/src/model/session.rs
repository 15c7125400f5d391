use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::{AnsweredEntry, QuestionRecord};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSessionError {
    #[error("a quiz needs at least one question")]
    Empty,

    #[error("quiz already completed")]
    Completed,

    #[error("quiz is not completed yet ({answered} of {total} answered)")]
    NotCompleted { answered: usize, total: usize },

    #[error("current index {current} is beyond {total} questions")]
    IndexOutOfRange { current: usize, total: usize },

    #[error("{answers} answers recorded but current index is {current}")]
    AnswerCountMismatch { answers: usize, current: usize },

    #[error("stored score {score} does not match {correct} correct answers")]
    ScoreMismatch { score: usize, correct: usize },
}

/// Where a visitor is in the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    NotStarted,
    InProgress { index: usize },
    Completed,
}

impl QuizState {
    /// State of an optional session; no session means the quiz has not started.
    #[must_use]
    pub fn of(session: Option<&QuizSession>) -> Self {
        session.map_or(Self::NotStarted, QuizSession::state)
    }
}

/// Result of finishing a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
    pub answers: Vec<AnsweredEntry>,
}

/// Per-visitor quiz state.
///
/// Holds a fixed sample of questions and steps through them sequentially. After
/// every transition `answers.len() == current` and `score <= answers.len()`.
#[derive(Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<QuestionRecord>,
    current: usize,
    score: usize,
    answers: Vec<AnsweredEntry>,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Begin a quiz over the given (already sampled) questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Empty` if no questions are provided.
    pub fn new(
        questions: Vec<QuestionRecord>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizSessionError> {
        if questions.is_empty() {
            return Err(QuizSessionError::Empty);
        }

        Ok(Self {
            questions,
            current: 0,
            score: 0,
            answers: Vec::new(),
            started_at,
        })
    }

    /// Rehydrate a session from persisted storage, re-checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError` if the stored fields are inconsistent with each other.
    pub fn from_persisted(
        questions: Vec<QuestionRecord>,
        current: usize,
        score: usize,
        answers: Vec<AnsweredEntry>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizSessionError> {
        if questions.is_empty() {
            return Err(QuizSessionError::Empty);
        }
        if current > questions.len() {
            return Err(QuizSessionError::IndexOutOfRange {
                current,
                total: questions.len(),
            });
        }
        if answers.len() != current {
            return Err(QuizSessionError::AnswerCountMismatch {
                answers: answers.len(),
                current,
            });
        }
        let correct = answers.iter().filter(|a| a.is_correct()).count();
        if score != correct {
            return Err(QuizSessionError::ScoreMismatch { score, correct });
        }

        Ok(Self {
            questions,
            current,
            score,
            answers,
            started_at,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[AnsweredEntry] {
        &self.answers
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Number of questions in this quiz.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// 1-based position of the current question.
    #[must_use]
    pub fn position(&self) -> usize {
        self.current + 1
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        if self.is_complete() {
            QuizState::Completed
        } else {
            QuizState::InProgress {
                index: self.current,
            }
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.questions.get(self.current)
    }

    /// Record an answer for the current question and advance.
    ///
    /// A missing answer is recorded as given and never matches.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Completed` if every question has been answered.
    pub fn submit_answer(
        &mut self,
        answer: Option<String>,
    ) -> Result<&AnsweredEntry, QuizSessionError> {
        let Some(question) = self.current_question() else {
            return Err(QuizSessionError::Completed);
        };

        let entry = AnsweredEntry::new(question, answer);
        if entry.is_correct() {
            self.score += 1;
        }
        self.answers.push(entry);
        self.current += 1;

        self.answers.last().ok_or(QuizSessionError::Completed)
    }

    /// Final score, total and answers of a completed quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::NotCompleted` while questions remain.
    pub fn summary(&self) -> Result<QuizSummary, QuizSessionError> {
        if !self.is_complete() {
            return Err(QuizSessionError::NotCompleted {
                answered: self.answers.len(),
                total: self.questions.len(),
            });
        }

        Ok(QuizSummary {
            score: self.score,
            total: self.questions.len(),
            answers: self.answers.clone(),
        })
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("answers_len", &self.answers.len())
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
