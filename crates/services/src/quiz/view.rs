use quiz_core::model::{AnsweredEntry, QuestionRecord, QuizSummary, SessionId};

/// Context for rendering the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub question: QuestionRecord,
    /// 1-based.
    pub position: usize,
    pub total: usize,
}

/// Context for rendering the final score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub score: usize,
    pub total: usize,
    pub answers: Vec<AnsweredEntry>,
}

impl From<QuizSummary> for ResultsView {
    fn from(summary: QuizSummary) -> Self {
        Self {
            score: summary.score,
            total: summary.total,
            answers: summary.answers,
        }
    }
}

/// What the boundary should show after a quiz request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    Question(QuestionView),
    Results(ResultsView),
    /// Session was unusable and has been cleared; send the visitor home.
    Restart,
}

/// Outcome plus the session the visitor should hold afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResponse {
    /// `None` means the visitor's session token should be dropped.
    pub session_id: Option<SessionId>,
    pub outcome: QuizOutcome,
}

impl QuizResponse {
    #[must_use]
    pub fn restart() -> Self {
        Self {
            session_id: None,
            outcome: QuizOutcome::Restart,
        }
    }

    #[must_use]
    pub fn question(&self) -> Option<&QuestionView> {
        match &self.outcome {
            QuizOutcome::Question(view) => Some(view),
            _ => None,
        }
    }

    #[must_use]
    pub fn results(&self) -> Option<&ResultsView> {
        match &self.outcome {
            QuizOutcome::Results(view) => Some(view),
            _ => None,
        }
    }
}
