#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    InMemorySessionStore, QuizSessionRecord, SessionStore, Storage, StorageError, StoredSession,
};
pub use sqlite::{SqliteInitError, SqliteSessionStore};
