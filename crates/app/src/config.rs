//! Validated runtime configuration built from [`Cli`].

use std::fmt;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use axum_extra::extract::cookie::Key;
use chrono::Duration;
use services::QuizSettings;
use thiserror::Error;

use crate::opt::{Cli, LogFormat, RunEnv};

/// `Key::derive_from` needs at least this much master key material.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("a session secret is required in production (set QUIZ_SESSION_SECRET)")]
    MissingSecret,
    #[error("session secret must be at least {min} bytes, got {len}")]
    ShortSecret { len: usize, min: usize },
    #[error("session lifetime must be a positive number of seconds")]
    InvalidTtl,
    #[error("unsupported session store {0:?}; expected `memory` or a `sqlite:` URL")]
    UnknownStore(String),
}

/// Where quiz sessions live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Memory,
    Sqlite(String),
}

impl StoreConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownStore` for anything but `memory` or a
    /// `sqlite:` URL.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("memory") {
            return Ok(Self::Memory);
        }
        if trimmed.starts_with("sqlite:") && trimmed.len() > "sqlite:".len() {
            return Ok(Self::Sqlite(normalize_sqlite_url(trimmed)));
        }
        Err(ConfigError::UnknownStore(raw.to_owned()))
    }
}

/// Turn relative file URLs into absolute `sqlite://` ones; in-memory URLs pass through.
fn normalize_sqlite_url(raw: &str) -> String {
    if raw.starts_with("sqlite://") || raw.contains(":memory:") || raw.contains("mode=memory") {
        return raw.to_owned();
    }

    let path_str = raw.strip_prefix("sqlite:").unwrap_or(raw);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Signing key and attributes for the session cookie.
#[derive(Clone)]
pub struct CookieSettings {
    pub key: Key,
    pub secure: bool,
    pub max_age_secs: i64,
}

impl fmt::Debug for CookieSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieSettings")
            .field("key", &"<redacted>")
            .field("secure", &self.secure)
            .field("max_age_secs", &self.max_age_secs)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub run_env: RunEnv,
    pub questions: Option<PathBuf>,
    pub title: String,
    pub log_format: LogFormat,
    pub store: StoreConfig,
    pub settings: QuizSettings,
    pub cookies: CookieSettings,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if production runs without a usable secret, the
    /// secret is too short, the lifetime is zero, or the store is unknown.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let production = cli.run_env == RunEnv::Production;

        let key = match cli.session_secret.as_deref() {
            Some(secret) if secret.len() < MIN_SECRET_LEN => {
                return Err(ConfigError::ShortSecret {
                    len: secret.len(),
                    min: MIN_SECRET_LEN,
                });
            }
            Some(secret) => Key::derive_from(secret.as_bytes()),
            None if production => return Err(ConfigError::MissingSecret),
            None => {
                tracing::warn!("no session secret configured; sessions will not survive a restart");
                Key::generate()
            }
        };

        let ttl_secs = i64::try_from(cli.session_ttl_secs)
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidTtl)?;

        let store = StoreConfig::parse(&cli.session_store)?;
        let secure = cli.secure_cookies || production;

        Ok(Self {
            host: cli.host,
            port: cli.port,
            run_env: cli.run_env,
            questions: cli.questions,
            title: cli.title,
            log_format: cli.log_format,
            store,
            settings: QuizSettings {
                sample_size: cli.sample_size,
                session_ttl: Duration::seconds(ttl_secs),
                answer_policy: cli.answer_policy,
            },
            cookies: CookieSettings {
                key,
                secure,
                max_age_secs: ttl_secs,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use services::AnswerPolicy;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("quiz").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn dev_defaults_are_usable_without_secret() {
        let config = AppConfig::from_cli(cli(&[])).unwrap();
        assert_eq!(config.port, 5001);
        assert_eq!(config.title, "DevOps Knowledge Test");
        assert_eq!(config.store, StoreConfig::Memory);
        assert_eq!(config.settings.sample_size, 3);
        assert_eq!(config.settings.session_ttl, Duration::minutes(30));
        assert_eq!(config.settings.answer_policy, AnswerPolicy::Exact);
        assert!(!config.cookies.secure);
        assert_eq!(config.cookies.max_age_secs, 1800);
    }

    #[test]
    fn production_requires_secret() {
        let err = AppConfig::from_cli(cli(&["--env", "production"])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecret));
    }

    #[test]
    fn short_secret_is_rejected() {
        let err = AppConfig::from_cli(cli(&["--session-secret", "hunter2"])).unwrap_err();
        assert!(matches!(err, ConfigError::ShortSecret { len: 7, .. }));
    }

    #[test]
    fn production_forces_secure_cookies() {
        let config =
            AppConfig::from_cli(cli(&["--env", "production", "--session-secret", SECRET]))
                .unwrap();
        assert!(config.cookies.secure);
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let err = AppConfig::from_cli(cli(&["--session-ttl-secs", "0"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTtl));
    }

    #[test]
    fn answer_policy_parses_from_flag() {
        let config = AppConfig::from_cli(cli(&["--answer-policy", "trim"])).unwrap();
        assert_eq!(config.settings.answer_policy, AnswerPolicy::Trim);
    }

    #[test]
    fn store_parsing() {
        assert_eq!(StoreConfig::parse("memory").unwrap(), StoreConfig::Memory);
        assert_eq!(
            StoreConfig::parse("sqlite::memory:").unwrap(),
            StoreConfig::Sqlite("sqlite::memory:".into())
        );
        assert_eq!(
            StoreConfig::parse("sqlite:///var/lib/quiz.db").unwrap(),
            StoreConfig::Sqlite("sqlite:///var/lib/quiz.db".into())
        );
        match StoreConfig::parse("sqlite:quiz.db").unwrap() {
            StoreConfig::Sqlite(url) => {
                assert!(url.starts_with("sqlite:///"), "{url}");
                assert!(url.ends_with("/quiz.db"), "{url}");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            StoreConfig::parse("redis://localhost"),
            Err(ConfigError::UnknownStore(_))
        ));
    }
}
