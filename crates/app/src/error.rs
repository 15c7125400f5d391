use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use services::QuizError;
use thiserror::Error;

/// Failure while handling a page request. Rendered as the restart page; the
/// cause is only logged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("quiz request failed: {source}")]
    Quiz {
        title: String,
        #[source]
        source: QuizError,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Quiz { title, source } => {
                tracing::error!(error = &source as &dyn std::error::Error, "quiz request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(ui::render_restart(&title)),
                )
                    .into_response()
            }
        }
    }
}
