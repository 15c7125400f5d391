//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use quiz_core::BankError;
use quiz_core::model::QuizSessionError;
use storage::repository::StorageError;

/// Errors emitted while sampling questions for a new quiz.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SampleError {
    #[error("sample size must be at least 1")]
    ZeroSize,
    #[error("sample size {requested} exceeds the {available} questions in the bank")]
    ExceedsBank { requested: usize, available: usize },
}

/// Errors emitted when `QuizService` is configured.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error(transparent)]
    Sample(#[from] SampleError),
    #[error("session lifetime must be positive")]
    NonPositiveTtl,
}

/// Errors emitted while loading a question bank file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankLoadError {
    #[error("cannot read question bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid question bank {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: BankError,
    },
}

/// Errors emitted by quiz transitions that could not be resolved into a quiz state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Sample(#[from] SampleError),
    #[error(transparent)]
    Session(#[from] QuizSessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
