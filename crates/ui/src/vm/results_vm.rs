use quiz_core::model::AnsweredEntry;
use services::ResultsView;

/// Shown in place of the visitor's answer when none was chosen.
pub const NO_ANSWER: &str = "(no answer)";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerRowVm {
    pub number: usize,
    pub prompt: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl AnswerRowVm {
    fn new(number: usize, entry: &AnsweredEntry) -> Self {
        Self {
            number,
            prompt: entry.prompt.clone(),
            user_answer: entry
                .user_answer
                .clone()
                .unwrap_or_else(|| NO_ANSWER.to_owned()),
            correct_answer: entry.correct_answer.clone(),
            is_correct: entry.is_correct(),
        }
    }

    #[must_use]
    pub fn status_class(&self) -> &'static str {
        if self.is_correct { "correct" } else { "incorrect" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score_label: String,
    pub rows: Vec<AnswerRowVm>,
}

impl From<&ResultsView> for ResultsVm {
    fn from(view: &ResultsView) -> Self {
        Self {
            score_label: format!("{} / {}", view.score, view.total),
            rows: view
                .answers
                .iter()
                .enumerate()
                .map(|(i, entry)| AnswerRowVm::new(i + 1, entry))
                .collect(),
        }
    }
}

#[must_use]
pub fn map_results(view: &ResultsView) -> ResultsVm {
    ResultsVm::from(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionRecord;

    #[test]
    fn rows_keep_order_and_mark_missing_answers() {
        let q1 = QuestionRecord::new("Q1", vec!["A".into(), "B".into()], "A").unwrap();
        let q2 = QuestionRecord::new("Q2", vec!["C".into(), "D".into()], "D").unwrap();
        let view = ResultsView {
            score: 1,
            total: 2,
            answers: vec![
                AnsweredEntry::new(&q1, Some("A".into())),
                AnsweredEntry::new(&q2, None),
            ],
        };

        let vm = map_results(&view);
        assert_eq!(vm.score_label, "1 / 2");
        assert_eq!(vm.rows[0].number, 1);
        assert!(vm.rows[0].is_correct);
        assert_eq!(vm.rows[1].user_answer, NO_ANSWER);
        assert!(!vm.rows[1].is_correct);
    }
}
