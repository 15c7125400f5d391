use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use services::{AnswerSubmission, QuizOutcome, QuizResponse};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/quiz", get(show_quiz).post(submit_quiz))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Posted quiz form. Both fields may be missing; an unparsable position is ignored.
/// A body that cannot be decoded at all is treated as a form with neither.
#[derive(Debug, Default, Deserialize)]
pub struct AnswerForm {
    answer: Option<String>,
    position: Option<String>,
}

impl From<AnswerForm> for AnswerSubmission {
    fn from(form: AnswerForm) -> Self {
        Self {
            answer: form.answer,
            position: form
                .position
                .as_deref()
                .and_then(|raw| raw.trim().parse().ok()),
        }
    }
}

async fn home(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, AppError> {
    state
        .quiz()
        .reset(AppState::session_id(&jar))
        .await
        .map_err(|e| state.error(e))?;

    Ok((
        AppState::clear_session(jar),
        Html(ui::render_home(state.title())),
    ))
}

async fn show_quiz(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let response = state
        .quiz()
        .view(AppState::session_id(&jar))
        .await
        .map_err(|e| state.error(e))?;
    Ok(respond(&state, jar, response))
}

async fn submit_quiz(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    form: Result<Form<AnswerForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "undecodable quiz form; submitting without an answer");
            AnswerForm::default()
        }
    };
    let response = state
        .quiz()
        .submit(AppState::session_id(&jar), form.into())
        .await
        .map_err(|e| state.error(e))?;
    Ok(respond(&state, jar, response))
}

async fn healthz() -> &'static str {
    "ok"
}

fn respond(state: &AppState, jar: SignedCookieJar, response: QuizResponse) -> Response {
    let jar = match response.session_id {
        Some(id) => state.store_session(jar, id),
        None => AppState::clear_session(jar),
    };

    match response.outcome {
        QuizOutcome::Question(view) => (jar, Html(ui::render_question(&view))).into_response(),
        QuizOutcome::Results(view) => {
            (jar, Html(ui::render_results(state.title(), &view))).into_response()
        }
        QuizOutcome::Restart => (jar, Redirect::to("/")).into_response(),
    }
}
