mod answer;
mod ids;
mod question;
mod session;

pub use answer::AnsweredEntry;
pub use ids::{ParseIdError, SessionId};
pub(crate) use question::QuestionDraft;
pub use question::{MAX_OPTIONS, MIN_OPTIONS, QuestionError, QuestionRecord};
pub use session::{QuizSession, QuizSessionError, QuizState, QuizSummary};
