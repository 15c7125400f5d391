use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::QuestionBank;
use quiz_core::model::{QuestionRecord, QuizSession, SessionId};
use quiz_core::time::{fixed_clock, fixed_now};
use services::{AnswerSubmission, QuizService, QuizSettings};
use storage::repository::{InMemorySessionStore, SessionStore, StorageError, StoredSession};

/// Store that yields after every read so two requests can interleave between
/// their load and their write.
#[derive(Clone)]
struct InterleavingStore {
    inner: InMemorySessionStore,
}

#[async_trait]
impl SessionStore for InterleavingStore {
    async fn load(
        &self,
        id: SessionId,
        now: DateTime<Utc>,
    ) -> Result<Option<StoredSession>, StorageError> {
        let loaded = self.inner.load(id, now).await;
        tokio::task::yield_now().await;
        loaded
    }

    async fn insert(
        &self,
        id: SessionId,
        session: &QuizSession,
        expires_at: DateTime<Utc>,
    ) -> Result<u64, StorageError> {
        self.inner.insert(id, session, expires_at).await
    }

    async fn update(
        &self,
        id: SessionId,
        session: &QuizSession,
        expected_version: u64,
        expires_at: DateTime<Utc>,
    ) -> Result<u64, StorageError> {
        self.inner
            .update(id, session, expected_version, expires_at)
            .await
    }

    async fn remove_version(
        &self,
        id: SessionId,
        expected_version: u64,
    ) -> Result<(), StorageError> {
        self.inner.remove_version(id, expected_version).await
    }

    async fn remove(&self, id: SessionId) -> Result<bool, StorageError> {
        self.inner.remove(id).await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StorageError> {
        self.inner.purge_expired(now).await
    }
}

fn bank() -> Arc<QuestionBank> {
    let questions = (1..=3)
        .map(|i| QuestionRecord::new(format!("Q{i}"), vec!["A".into(), "B".into()], "A").unwrap())
        .collect();
    Arc::new(QuestionBank::new(questions).unwrap())
}

fn build_service(inner: &InMemorySessionStore) -> QuizService {
    let store = InterleavingStore {
        inner: inner.clone(),
    };
    QuizService::new(fixed_clock(), bank(), Arc::new(store), QuizSettings::default())
        .unwrap()
        .with_seed(5)
}

#[tokio::test]
async fn double_submit_advances_only_once() {
    let inner = InMemorySessionStore::new();
    let svc = build_service(&inner);
    let id = svc.view(None).await.unwrap().session_id;

    let (a, b) = tokio::join!(
        svc.submit(id, AnswerSubmission::new("A")),
        svc.submit(id, AnswerSubmission::new("A")),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    // Both callers see the same surviving state: question 2.
    assert_eq!(a.question().unwrap().position, 2);
    assert_eq!(b.question().unwrap().position, 2);

    let stored = inner.load(id.unwrap(), fixed_now()).await.unwrap().unwrap();
    assert_eq!(stored.session.current_index(), 1);
    assert_eq!(stored.session.answers().len(), 1);
    assert_eq!(stored.session.score(), 1);
}

#[tokio::test]
async fn racing_final_answers_complete_once() {
    let inner = InMemorySessionStore::new();
    let svc = build_service(&inner);
    let id = svc.view(None).await.unwrap().session_id;
    svc.submit(id, AnswerSubmission::new("A")).await.unwrap();
    svc.submit(id, AnswerSubmission::new("A")).await.unwrap();

    let (a, b) = tokio::join!(
        svc.submit(id, AnswerSubmission::new("A")),
        svc.submit(id, AnswerSubmission::new("B")),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    let results: Vec<_> = [&a, &b].into_iter().filter_map(|r| r.results()).collect();
    assert_eq!(results.len(), 1, "exactly one request completes the quiz");
    assert_eq!(results[0].answers.len(), 3);
    assert_eq!(inner.len().unwrap(), 0);
}

#[tokio::test]
async fn concurrent_sessions_do_not_interact() {
    let inner = InMemorySessionStore::new();
    let svc = build_service(&inner);
    let first = svc.view(None).await.unwrap().session_id;
    let second = svc.view(None).await.unwrap().session_id;
    assert_ne!(first, second);

    let (a, b) = tokio::join!(
        svc.submit(first, AnswerSubmission::new("A")),
        svc.submit(second, AnswerSubmission::new("B")),
    );
    assert_eq!(a.unwrap().question().unwrap().position, 2);
    assert_eq!(b.unwrap().question().unwrap().position, 2);

    let a = inner.load(first.unwrap(), fixed_now()).await.unwrap().unwrap();
    let b = inner.load(second.unwrap(), fixed_now()).await.unwrap().unwrap();
    assert_eq!(a.session.score(), 1);
    assert_eq!(b.session.score(), 0);
}
