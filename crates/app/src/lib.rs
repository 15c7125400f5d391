#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod net;
pub mod opt;
pub mod routes;
pub mod state;
pub mod store;
pub mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use quiz_core::QuestionBank;
use services::{Clock, QuizService, load_bank};

pub use config::{AppConfig, ConfigError, CookieSettings, StoreConfig};
pub use opt::Cli;
pub use routes::router;
pub use state::{AppState, SESSION_COOKIE};

/// Build everything from validated config and serve until interrupted.
///
/// # Errors
///
/// Returns an error if the bank, store, or listener cannot be set up, or the
/// server fails.
pub async fn run(config: AppConfig) -> Result<()> {
    let bank = match &config.questions {
        Some(path) => load_bank(path)?,
        None => QuestionBank::builtin()?,
    };
    let storage = store::open_store(&config.store).await?;
    let quiz = QuizService::new(
        Clock::default_clock(),
        Arc::new(bank),
        storage.sessions,
        config.settings.clone(),
    )
    .context("invalid quiz settings")?;
    tracing::info!(
        questions = quiz.bank().len(),
        sample_size = quiz.settings().sample_size,
        answer_policy = %quiz.settings().answer_policy,
        "quiz ready"
    );
    let state = AppState::new(quiz, config.title.clone(), config.cookies.clone());

    let listener = net::create_listener(config.host, config.port).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        env = ?config.run_env,
        "quiz server listening"
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
