#![forbid(unsafe_code)]

pub mod bank_loader;
pub mod error;
pub mod quiz;

pub use quiz_core::Clock;

pub use bank_loader::load_bank;
pub use error::{BankLoadError, ConfigError, QuizError, SampleError};
pub use quiz::{
    AnswerPolicy, AnswerSubmission, QuestionSampler, QuestionView, QuizOutcome, QuizResponse,
    QuizService, QuizSettings, ResultsView,
};
