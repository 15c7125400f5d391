mod question_vm;
mod results_vm;

pub use question_vm::{OptionVm, QuestionVm, map_question};
pub use results_vm::{AnswerRowVm, NO_ANSWER, ResultsVm, map_results};
