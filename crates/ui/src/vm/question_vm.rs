use services::QuestionView;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub input_id: String,
    pub value: String,
}

/// Display-ready data for one quiz question page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub page_title: String,
    pub progress_label: String,
    pub prompt: String,
    pub position: usize,
    pub options: Vec<OptionVm>,
}

impl From<&QuestionView> for QuestionVm {
    fn from(view: &QuestionView) -> Self {
        let options = view
            .question
            .options()
            .iter()
            .enumerate()
            .map(|(i, value)| OptionVm {
                input_id: format!("option-{i}"),
                value: value.clone(),
            })
            .collect();

        Self {
            page_title: format!("Quiz - Question {}", view.position),
            progress_label: format!("Question {} of {}", view.position, view.total),
            prompt: view.question.prompt().to_owned(),
            position: view.position,
            options,
        }
    }
}

#[must_use]
pub fn map_question(view: &QuestionView) -> QuestionVm {
    QuestionVm::from(view)
}
