use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_LLM_API_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_api_url: String,
    /// Directory backing the local key-value store (history log).
    pub data_dir: PathBuf,
    /// Pause between the final interviewer reply and report synthesis.
    pub report_delay: Duration,
    /// Simulated duration of a coding-round "run".
    pub run_delay: Duration,
    /// How long a finished, recorded session stays readable.
    pub session_ttl: Duration,
    /// Seed for the randomized sub-scores. `None` seeds from entropy.
    pub score_seed: Option<u64>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            llm_api_key: require_env("LLM_API_KEY")?,
            llm_api_url: std::env::var("LLM_API_URL")
                .unwrap_or_else(|_| DEFAULT_LLM_API_URL.to_string()),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            report_delay: Duration::from_millis(parse_env("REPORT_DELAY_MS", 3000)?),
            run_delay: Duration::from_millis(parse_env("RUN_DELAY_MS", 1000)?),
            session_ttl: Duration::from_secs(parse_env("SESSION_TTL_SECS", 3600)?),
            score_seed: match std::env::var("SCORE_SEED") {
                Ok(v) => Some(v.parse::<u64>().context("SCORE_SEED must be an unsigned integer")?),
                Err(_) => None,
            },
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Config for unit tests: no delays, fixed seed, throwaway data dir.
    pub fn for_tests(data_dir: PathBuf) -> Self {
        Config {
            llm_api_key: "test-key".to_string(),
            llm_api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            data_dir,
            report_delay: Duration::ZERO,
            run_delay: Duration::ZERO,
            session_ttl: Duration::from_secs(3600),
            score_seed: Some(7),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
