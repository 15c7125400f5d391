use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use quiz_core::model::SessionId;
use services::{QuizError, QuizService};

use crate::config::CookieSettings;
use crate::error::AppError;

pub const SESSION_COOKIE: &str = "quiz_session";

struct InnerState {
    quiz: QuizService,
    title: String,
    cookies: CookieSettings,
}

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct AppState(Arc<InnerState>);

impl AppState {
    #[must_use]
    pub fn new(quiz: QuizService, title: impl Into<String>, cookies: CookieSettings) -> Self {
        Self(Arc::new(InnerState {
            quiz,
            title: title.into(),
            cookies,
        }))
    }

    pub fn quiz(&self) -> &QuizService {
        &self.0.quiz
    }

    pub fn title(&self) -> &str {
        &self.0.title
    }

    pub(crate) fn error(&self, source: QuizError) -> AppError {
        AppError::Quiz {
            title: self.0.title.clone(),
            source,
        }
    }

    /// Session id from a verified cookie; tampered or malformed values read as none.
    pub(crate) fn session_id(jar: &SignedCookieJar) -> Option<SessionId> {
        let cookie = jar.get(SESSION_COOKIE)?;
        match cookie.value().parse() {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring malformed session cookie");
                None
            }
        }
    }

    pub(crate) fn store_session(&self, jar: SignedCookieJar, id: SessionId) -> SignedCookieJar {
        let settings = &self.0.cookies;
        let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(settings.secure)
            .max_age(time::Duration::seconds(settings.max_age_secs));
        jar.add(cookie)
    }

    pub(crate) fn clear_session(jar: SignedCookieJar) -> SignedCookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.0.cookies.key.clone()
    }
}
