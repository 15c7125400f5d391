use serde::{Deserialize, Serialize};

use crate::model::QuestionRecord;

/// One submitted answer, recorded in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredEntry {
    pub prompt: String,
    /// `None` when the visitor submitted the form without choosing an option.
    pub user_answer: Option<String>,
    pub correct_answer: String,
}

impl AnsweredEntry {
    #[must_use]
    pub fn new(question: &QuestionRecord, user_answer: Option<String>) -> Self {
        Self {
            prompt: question.prompt().to_owned(),
            user_answer,
            correct_answer: question.correct_answer().to_owned(),
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.user_answer.as_deref() == Some(self.correct_answer.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_copies_question_and_scores_exactly() {
        let q = QuestionRecord::new("Q", vec!["A".into(), "B".into()], "A").unwrap();

        let right = AnsweredEntry::new(&q, Some("A".into()));
        assert_eq!(right.prompt, "Q");
        assert_eq!(right.correct_answer, "A");
        assert!(right.is_correct());

        assert!(!AnsweredEntry::new(&q, Some("B".into())).is_correct());
        assert!(!AnsweredEntry::new(&q, None).is_correct());
    }
}
