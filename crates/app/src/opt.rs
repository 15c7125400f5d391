use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use services::AnswerPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunEnv {
    Dev,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "quiz", about = "Serve a multiple-choice quiz over HTTP")]
pub struct Cli {
    #[arg(long, env = "QUIZ_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[arg(short, long, env = "QUIZ_PORT", default_value_t = 5001)]
    pub port: u16,

    #[arg(long = "env", env = "QUIZ_ENV", value_enum, default_value_t = RunEnv::Dev)]
    pub run_env: RunEnv,

    #[arg(long, env = "QUIZ_QUESTIONS", help = "JSON question bank; built-in questions if unset")]
    pub questions: Option<PathBuf>,

    #[arg(long, env = "QUIZ_SAMPLE_SIZE", default_value_t = 3)]
    pub sample_size: usize,

    #[arg(long, env = "QUIZ_SESSION_SECRET", hide_env_values = true)]
    pub session_secret: Option<String>,

    #[arg(long, env = "QUIZ_SESSION_TTL_SECS", default_value_t = 1800)]
    pub session_ttl_secs: u64,

    #[arg(
        long,
        env = "QUIZ_SESSION_STORE",
        default_value = "memory",
        help = "`memory` or a `sqlite:` URL"
    )]
    pub session_store: String,

    #[arg(long, env = "QUIZ_SECURE_COOKIES")]
    pub secure_cookies: bool,

    #[arg(long, env = "QUIZ_ANSWER_POLICY", default_value_t = AnswerPolicy::Exact)]
    pub answer_policy: AnswerPolicy,

    #[arg(long, env = "QUIZ_TITLE", default_value = "DevOps Knowledge Test")]
    pub title: String,

    #[arg(long, env = "QUIZ_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}
