use anyhow::{bail, Context, Result};

/// Questions answered before the interview pauses for a continue/finalize decision.
pub const DEFAULT_QUESTION_CAP: u32 = 30;
/// How many extra questions each "ask more" grants.
pub const DEFAULT_CAP_INCREMENT: u32 = 5;

/// Application configuration loaded from environment variables.
///
/// The model credential is optional: without it the service still starts and the
/// gateway degrades per operation instead of refusing to boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub question_cap: u32,
    pub cap_increment: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            question_cap: positive_env("INTERVIEW_QUESTION_CAP", DEFAULT_QUESTION_CAP)?,
            cap_increment: positive_env("INTERVIEW_CAP_INCREMENT", DEFAULT_CAP_INCREMENT)?,
        })
    }
}

/// Blank values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn positive_env(key: &str, default: u32) -> Result<u32> {
    let Some(raw) = optional_env(key) else {
        return Ok(default);
    };
    parse_positive(key, &raw)
}

fn parse_positive(key: &str, raw: &str) -> Result<u32> {
    let value = raw
        .parse::<u32>()
        .with_context(|| format!("{key} must be a positive integer, got '{raw}'"))?;
    if value == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(value)
}
