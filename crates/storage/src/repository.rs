use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{AnsweredEntry, QuestionRecord, QuizSession, QuizSessionError, SessionId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The record changed (or vanished) since it was read.
    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("stored session is invalid: {0}")]
    InvalidSession(#[from] QuizSessionError),
}

/// Persisted shape for a quiz session.
///
/// This mirrors the domain `QuizSession` so stores can serialize/deserialize
/// without leaking storage concerns into the domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSessionRecord {
    pub questions: Vec<QuestionRecord>,
    pub current: usize,
    pub score: usize,
    pub answers: Vec<AnsweredEntry>,
    pub started_at: DateTime<Utc>,
}

impl QuizSessionRecord {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        Self {
            questions: session.questions().to_vec(),
            current: session.current_index(),
            score: session.score(),
            answers: session.answers().to_vec(),
            started_at: session.started_at(),
        }
    }

    /// Convert the record back into a domain `QuizSession`.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError` if the stored fields break a session invariant.
    pub fn into_session(self) -> Result<QuizSession, QuizSessionError> {
        QuizSession::from_persisted(
            self.questions,
            self.current,
            self.score,
            self.answers,
            self.started_at,
        )
    }
}

/// A session as held by a store, with its optimistic-concurrency version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub session: QuizSession,
    pub version: u64,
    pub expires_at: DateTime<Utc>,
}

/// Store contract for per-visitor quiz sessions.
///
/// Every write is a compare-and-swap on the version returned by the previous read,
/// so two requests racing on the same session cannot both apply a transition.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch a live session.
    ///
    /// Expired records are deleted and reported as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidSession` if the record fails validation, or other
    /// storage errors.
    async fn load(
        &self,
        id: SessionId,
        now: DateTime<Utc>,
    ) -> Result<Option<StoredSession>, StorageError>;

    /// Create a new session record at version 0.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id is already taken.
    async fn insert(
        &self,
        id: SessionId,
        session: &QuizSession,
        expires_at: DateTime<Utc>,
    ) -> Result<u64, StorageError>;

    /// Replace a session if it is still at `expected_version`; returns the new version.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the record is missing or was changed.
    async fn update(
        &self,
        id: SessionId,
        session: &QuizSession,
        expected_version: u64,
        expires_at: DateTime<Utc>,
    ) -> Result<u64, StorageError>;

    /// Delete a session if it is still at `expected_version`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the record is missing or was changed.
    async fn remove_version(&self, id: SessionId, expected_version: u64)
    -> Result<(), StorageError>;

    /// Delete a session unconditionally; returns whether a record existed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be reached.
    async fn remove(&self, id: SessionId) -> Result<bool, StorageError>;

    /// Delete every record that expired before `now`; returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be reached.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StorageError>;
}

#[derive(Debug, Clone)]
struct Entry {
    record: QuizSessionRecord,
    version: u64,
    expires_at: DateTime<Utc>,
}

/// In-memory session store for single-process deployments and tests.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Entry>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Overwrite a raw record, bypassing validation. Test hook for corrupted state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_record(
        &self,
        id: SessionId,
        record: QuizSessionRecord,
        version: u64,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(
            id,
            Entry {
                record,
                version,
                expires_at,
            },
        );
        Ok(())
    }

    /// Number of records currently held, expired ones included.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.len())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(
        &self,
        id: SessionId,
        now: DateTime<Utc>,
    ) -> Result<Option<StoredSession>, StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let Some(entry) = guard.get(&id) else {
            return Ok(None);
        };
        if entry.expires_at <= now {
            guard.remove(&id);
            return Ok(None);
        }

        let session = entry.record.clone().into_session()?;
        Ok(Some(StoredSession {
            session,
            version: entry.version,
            expires_at: entry.expires_at,
        }))
    }

    async fn insert(
        &self,
        id: SessionId,
        session: &QuizSession,
        expires_at: DateTime<Utc>,
    ) -> Result<u64, StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.contains_key(&id) {
            return Err(StorageError::Conflict);
        }
        guard.insert(
            id,
            Entry {
                record: QuizSessionRecord::from_session(session),
                version: 0,
                expires_at,
            },
        );
        Ok(0)
    }

    async fn update(
        &self,
        id: SessionId,
        session: &QuizSession,
        expected_version: u64,
        expires_at: DateTime<Utc>,
    ) -> Result<u64, StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.get_mut(&id) {
            Some(entry) if entry.version == expected_version => {
                entry.record = QuizSessionRecord::from_session(session);
                entry.version += 1;
                entry.expires_at = expires_at;
                Ok(entry.version)
            }
            _ => Err(StorageError::Conflict),
        }
    }

    async fn remove_version(
        &self,
        id: SessionId,
        expected_version: u64,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.get(&id) {
            Some(entry) if entry.version == expected_version => {
                guard.remove(&id);
                Ok(())
            }
            _ => Err(StorageError::Conflict),
        }
    }

    async fn remove(&self, id: SessionId) -> Result<bool, StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.remove(&id).is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let before = guard.len();
        guard.retain(|_, entry| entry.expires_at > now);
        Ok(u64::try_from(before - guard.len()).unwrap_or(u64::MAX))
    }
}

/// Session store behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        Self { sessions }
    }
}
