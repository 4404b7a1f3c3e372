use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Enables the AI scoring path. Unset → heuristic scoring only.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on one AI attempt, retries included.
    pub ai_timeout_secs: u64,
    /// Fixed seed for heuristic jitter; makes fallback scores reproducible.
    pub scoring_seed: Option<u64>,
    /// JSON file replacing the built-in scoring tables.
    pub scoring_tables_path: Option<String>,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            port: 8080,
            rust_log: "info".to_string(),
            ai_timeout_secs: 30,
            scoring_seed: None,
            scoring_tables_path: None,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            port: parse_env("PORT")?.unwrap_or(defaults.port),
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            ai_timeout_secs: parse_env("AI_TIMEOUT_SECS")?.unwrap_or(defaults.ai_timeout_secs),
            scoring_seed: parse_env("SCORING_SEED")?,
            scoring_tables_path: optional_env("SCORING_TABLES_PATH"),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES")?.unwrap_or(defaults.max_upload_bytes),
        })
    }
}

/// Reads a variable, treating an empty value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    optional_env(key)
        .map(|raw| {
            raw.parse::<T>()
                .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'"))
        })
        .transpose()
}
