mod policy;
mod sampler;
mod view;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use policy::{AnswerPolicy, AnswerSubmission, ParsePolicyError};
pub use sampler::QuestionSampler;
pub use view::{QuestionView, QuizOutcome, QuizResponse, ResultsView};
pub use workflow::{QuizService, QuizSettings};
