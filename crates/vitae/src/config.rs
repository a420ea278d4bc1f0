use anyhow::{Context, Result};

/// Engine configuration loaded from environment variables.
///
/// The pure paths (normalize, layout, export) need no configuration at all.
/// Only the AI-oracle client reads anything here, and a missing API key
/// simply disables that path — imports then fall back to the heuristic
/// text extractor.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenRouter bearer token. `None` (or empty) disables the oracle.
    pub openrouter_api_key: Option<String>,
    pub oracle_model: String,
    /// Optional `HTTP-Referer` courtesy header for OpenRouter rankings.
    pub oracle_referer: Option<String>,
    pub oracle_max_retries: u32,
}

pub const DEFAULT_ORACLE_MODEL: &str = "qwen/qwen-2.5-72b-instruct";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openrouter_api_key: optional_env("OPENROUTER_API_KEY"),
            oracle_model: std::env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| DEFAULT_ORACLE_MODEL.to_string()),
            oracle_referer: optional_env("OPENROUTER_REFERER"),
            oracle_max_retries: std::env::var("ORACLE_MAX_RETRIES")
                .unwrap_or_else(|_| "2".to_string())
                .parse::<u32>()
                .context("ORACLE_MAX_RETRIES must be a non-negative integer")?,
        })
    }

    /// Configuration with the oracle disabled, for hosts that never want the
    /// network path (and for tests).
    pub fn offline() -> Self {
        Config {
            openrouter_api_key: None,
            oracle_model: DEFAULT_ORACLE_MODEL.to_string(),
            oracle_referer: None,
            oracle_max_retries: 2,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::offline()
    }
}

/// Reads an environment variable, treating "unset" and "set but empty" the
/// same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
