use thiserror::Error;

use crate::model::{QuestionDraft, QuestionError, QuestionRecord};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank is empty")]
    Empty,

    #[error("question #{index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },

    #[error("question bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only pool of questions a quiz samples from.
///
/// Built once at startup and shared; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<QuestionRecord>,
}

impl QuestionBank {
    /// # Errors
    ///
    /// Returns `BankError::Empty` if no questions are provided.
    pub fn new(questions: Vec<QuestionRecord>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self { questions })
    }

    /// Parse a JSON array of `{ "question", "options", "answer" }` objects.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Parse` for malformed JSON, `BankError::InvalidQuestion`
    /// for the first record that fails validation, and `BankError::Empty` for `[]`.
    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let drafts: Vec<QuestionDraft> = serde_json::from_str(json)?;
        Self::from_drafts(drafts)
    }

    /// Validate drafts one at a time so errors can name the offending position.
    fn from_drafts(drafts: Vec<QuestionDraft>) -> Result<Self, BankError> {
        let questions = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                QuestionRecord::try_from(draft)
                    .map_err(|source| BankError::InvalidQuestion { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    /// The ten general-knowledge questions shipped with the application.
    ///
    /// # Errors
    ///
    /// Returns `BankError::InvalidQuestion` if a shipped question fails validation.
    pub fn builtin() -> Result<Self, BankError> {
        const BUILTIN: &[(&str, [&str; 3], &str)] = &[
            ("Capital of Croatia?", ["Zagreb", "Split", "Rijeka"], "Zagreb"),
            ("Largest Croatian island?", ["Krk", "Cres", "Hvar"], "Cres"),
            ("Author of 'The Poet in Trouble'?", ["Krleža", "Andrić", "Šenoa"], "Krleža"),
            ("Highest mountain in the world?", ["Kilimanjaro", "Everest", "Mont Blanc"], "Everest"),
            ("First president of Croatia?", ["Tuđman", "Mesić", "Josipović"], "Tuđman"),
            ("Which planet is known as the Red Planet?", ["Venus", "Mars", "Jupiter"], "Mars"),
            ("In which year did World War II begin?", ["1939", "1941", "1945"], "1939"),
            ("Largest ocean in the world?", ["Atlantic", "Pacific", "Indian"], "Pacific"),
            ("Who wrote 'Romeo and Juliet'?", ["Shakespeare", "Dante", "Goethe"], "Shakespeare"),
            ("Which city hosted the 2008 Olympic Games?", ["Beijing", "London", "Athens"], "Beijing"),
        ];

        let drafts = BUILTIN
            .iter()
            .map(|(prompt, options, answer)| QuestionDraft {
                question: (*prompt).to_owned(),
                options: options.iter().map(|o| (*o).to_owned()).collect(),
                answer: (*answer).to_owned(),
            })
            .collect();
        Self::from_drafts(drafts)
    }

    /// Every question in bank order.
    #[must_use]
    pub fn all_questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bank_has_ten_valid_questions() {
        let bank = QuestionBank::builtin().unwrap();
        assert_eq!(bank.len(), 10);
        for q in bank.all_questions() {
            assert!(q.options().iter().any(|o| o == q.correct_answer()));
        }
    }

    #[test]
    fn invalid_draft_fails_the_whole_bank() {
        let drafts = vec![
            QuestionDraft {
                question: "Ok".into(),
                options: vec!["A".into(), "B".into()],
                answer: "A".into(),
            },
            QuestionDraft {
                question: "Bad".into(),
                options: vec!["A".into(), "A".into()],
                answer: "A".into(),
            },
        ];
        let err = QuestionBank::from_drafts(drafts).unwrap_err();
        assert!(matches!(err, BankError::InvalidQuestion { index: 1, .. }));
    }

    #[test]
    fn empty_bank_is_rejected() {
        assert!(matches!(QuestionBank::new(Vec::new()), Err(BankError::Empty)));
        assert!(matches!(QuestionBank::from_json("[]"), Err(BankError::Empty)));
    }

    #[test]
    fn from_json_keeps_file_order() {
        let json = r#"[
            {"question": "Capital?", "options": ["A", "B"], "answer": "A"},
            {"question": "Largest?", "options": ["C", "D"], "answer": "D"}
        ]"#;
        let bank = QuestionBank::from_json(json).unwrap();
        let prompts: Vec<_> = bank.all_questions().iter().map(QuestionRecord::prompt).collect();
        assert_eq!(prompts, ["Capital?", "Largest?"]);
    }

    #[test]
    fn from_json_reports_invalid_record_index() {
        let json = r#"[
            {"question": "Ok", "options": ["A", "B"], "answer": "A"},
            {"question": "Bad", "options": ["A", "B"], "answer": "Z"}
        ]"#;
        let err = QuestionBank::from_json(json).unwrap_err();
        assert!(matches!(err, BankError::InvalidQuestion { index: 1, .. }));
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        assert!(matches!(QuestionBank::from_json("{not json"), Err(BankError::Parse(_))));
        assert!(matches!(
            QuestionBank::from_json(r#"[{"question": "Q"}]"#),
            Err(BankError::Parse(_))
        ));
    }
}
