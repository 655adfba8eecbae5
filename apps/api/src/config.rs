use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_LLM_BASE_URL: &str = "https://api.aimlapi.com/v1";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
const DEFAULT_SESSION_IDLE_TTL_SECS: u64 = 60 * 60;

/// Application configuration loaded from environment variables.
/// Fails at startup if the API credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    /// Base URL of the OpenAI-compatible completion service (no trailing `/chat/completions`).
    pub llm_base_url: String,
    pub llm_timeout: Duration,
    /// Scratch directory for PDF exports. Files are removed after they are read back.
    pub export_dir: PathBuf,
    /// Sessions unused for longer than this are dropped along with their history.
    pub session_idle_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm_timeout_secs = std::env::var("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_LLM_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;

        let session_idle_ttl_secs = std::env::var("SESSION_IDLE_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_SESSION_IDLE_TTL_SECS.to_string())
            .parse::<u64>()
            .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?;

        Ok(Config {
            api_key: require_env("API_KEY")?,
            llm_base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string()),
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            export_dir: std::env::var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            session_idle_ttl: Duration::from_secs(session_idle_ttl_secs),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value =
        std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}
