use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::repository::{SessionStore, StorageError, StoredSession};

use quiz_core::QuestionBank;
use quiz_core::model::{QuizSession, QuizState, SessionId};

use super::policy::{AnswerPolicy, AnswerSubmission};
use super::sampler::QuestionSampler;
use super::view::{QuestionView, QuizOutcome, QuizResponse, ResultsView};
use crate::Clock;
use crate::error::{ConfigError, QuizError};

/// Tunables for `QuizService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    /// Questions per quiz (`K`).
    pub sample_size: usize,
    /// Inactivity timeout; refreshed on every recorded answer.
    pub session_ttl: Duration,
    pub answer_policy: AnswerPolicy,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            sample_size: 3,
            session_ttl: Duration::minutes(30),
            answer_policy: AnswerPolicy::Exact,
        }
    }
}

/// Outcome of reading a visitor's session from the store.
enum Lookup {
    Active(SessionId, StoredSession),
    Missing,
    /// The session existed but was unusable and has been cleared.
    Cleared,
}

/// Drives the quiz state machine over a session store.
///
/// Each call reads the visitor's session, applies at most one transition and
/// writes it back with a version check, so concurrent requests for one session
/// cannot both advance it.
pub struct QuizService {
    clock: Clock,
    bank: Arc<QuestionBank>,
    sessions: Arc<dyn SessionStore>,
    sampler: QuestionSampler,
    settings: QuizSettings,
    rng: Mutex<StdRng>,
}

impl QuizService {
    /// # Errors
    ///
    /// Returns `ConfigError` if the sample size is zero or larger than the bank,
    /// or the session lifetime is not positive.
    pub fn new(
        clock: Clock,
        bank: Arc<QuestionBank>,
        sessions: Arc<dyn SessionStore>,
        settings: QuizSettings,
    ) -> Result<Self, ConfigError> {
        let sampler = QuestionSampler::new(settings.sample_size, &bank)?;
        if settings.session_ttl <= Duration::zero() {
            return Err(ConfigError::NonPositiveTtl);
        }

        Ok(Self {
            clock,
            bank,
            sessions,
            sampler,
            settings,
            rng: Mutex::new(StdRng::from_os_rng()),
        })
    }

    /// Use a deterministic random source for sampling.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Visit home: drop whatever session the visitor had.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the store cannot be reached.
    pub async fn reset(&self, session_id: Option<SessionId>) -> Result<(), QuizError> {
        if let Some(id) = session_id {
            if self.sessions.remove(id).await? {
                tracing::debug!(session_id = %id, "session cleared");
            }
        }
        Ok(())
    }

    /// Show the current question, beginning a quiz if the visitor has none.
    ///
    /// Never mutates an existing session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the store cannot be reached.
    pub async fn view(&self, session_id: Option<SessionId>) -> Result<QuizResponse, QuizError> {
        let now = self.clock.now();
        match self.lookup(session_id, now).await? {
            Lookup::Active(id, stored) => Ok(present(id, &stored.session)),
            Lookup::Missing => self.begin(now).await,
            Lookup::Cleared => Ok(QuizResponse::restart()),
        }
    }

    /// Record an answer for the current question and advance.
    ///
    /// Without an active session a fresh quiz is begun and nothing is recorded. A
    /// submission carrying a position other than the current one is treated as
    /// stale and ignored.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the store cannot be reached.
    pub async fn submit(
        &self,
        session_id: Option<SessionId>,
        submission: AnswerSubmission,
    ) -> Result<QuizResponse, QuizError> {
        let now = self.clock.now();
        let (id, stored) = match self.lookup(session_id, now).await? {
            Lookup::Active(id, stored) => (id, stored),
            Lookup::Missing => return self.begin(now).await,
            Lookup::Cleared => return Ok(QuizResponse::restart()),
        };

        if let Some(position) = submission.position {
            if position != stored.session.position() {
                tracing::debug!(
                    session_id = %id,
                    submitted = position,
                    current = stored.session.position(),
                    "ignoring stale submission"
                );
                return Ok(present(id, &stored.session));
            }
        }

        let StoredSession {
            mut session,
            version,
            ..
        } = stored;
        let answer = self.settings.answer_policy.normalize(submission.answer);
        let correct = session.submit_answer(answer)?.is_correct();
        tracing::debug!(
            session_id = %id,
            position = session.current_index(),
            correct,
            "answer recorded"
        );

        if session.is_complete() {
            return match self.sessions.remove_version(id, version).await {
                Ok(()) => {
                    let summary = session.summary()?;
                    tracing::info!(
                        session_id = %id,
                        score = summary.score,
                        total = summary.total,
                        "quiz completed"
                    );
                    Ok(QuizResponse {
                        session_id: None,
                        outcome: QuizOutcome::Results(ResultsView::from(summary)),
                    })
                }
                Err(StorageError::Conflict) => self.after_conflict(id, now).await,
                Err(err) => Err(err.into()),
            };
        }

        let expires_at = now + self.settings.session_ttl;
        match self.sessions.update(id, &session, version, expires_at).await {
            Ok(_) => Ok(present(id, &session)),
            Err(StorageError::Conflict) => self.after_conflict(id, now).await,
            Err(err) => Err(err.into()),
        }
    }

    async fn begin(&self, now: DateTime<Utc>) -> Result<QuizResponse, QuizError> {
        let purged = self.sessions.purge_expired(now).await?;
        if purged > 0 {
            tracing::debug!(purged, "purged expired sessions");
        }

        let questions = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.sampler.sample(&self.bank, &mut *rng)?
        };
        let session = QuizSession::new(questions, now)?;
        let id = SessionId::random();
        self.sessions
            .insert(id, &session, now + self.settings.session_ttl)
            .await?;

        tracing::info!(session_id = %id, total = session.total(), "quiz started");
        Ok(present(id, &session))
    }

    async fn lookup(
        &self,
        session_id: Option<SessionId>,
        now: DateTime<Utc>,
    ) -> Result<Lookup, QuizError> {
        let Some(id) = session_id else {
            return Ok(Lookup::Missing);
        };

        match self.sessions.load(id, now).await {
            Ok(stored) => match (QuizState::of(stored.as_ref().map(|s| &s.session)), stored) {
                (QuizState::InProgress { .. }, Some(stored)) => Ok(Lookup::Active(id, stored)),
                (QuizState::Completed, _) => {
                    tracing::warn!(session_id = %id, "completed session was still stored; clearing");
                    self.sessions.remove(id).await?;
                    Ok(Lookup::Cleared)
                }
                _ => Ok(Lookup::Missing),
            },
            Err(err @ (StorageError::InvalidSession(_) | StorageError::Serialization(_))) => {
                tracing::warn!(session_id = %id, error = %err, "stored session is invalid; clearing");
                self.sessions.remove(id).await?;
                Ok(Lookup::Cleared)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Another request changed the session between our read and write; show
    /// whatever state won instead of applying this submission.
    async fn after_conflict(
        &self,
        id: SessionId,
        now: DateTime<Utc>,
    ) -> Result<QuizResponse, QuizError> {
        tracing::warn!(session_id = %id, "concurrent submission lost the race; not applied");
        match self.lookup(Some(id), now).await? {
            Lookup::Active(id, stored) => Ok(present(id, &stored.session)),
            Lookup::Missing | Lookup::Cleared => Ok(QuizResponse::restart()),
        }
    }
}

fn present(id: SessionId, session: &QuizSession) -> QuizResponse {
    match session.current_question() {
        Some(question) => QuizResponse {
            session_id: Some(id),
            outcome: QuizOutcome::Question(QuestionView {
                question: question.clone(),
                position: session.position(),
                total: session.total(),
            }),
        },
        None => QuizResponse::restart(),
    }
}

impl fmt::Debug for QuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizService")
            .field("clock", &self.clock)
            .field("bank_len", &self.bank.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
