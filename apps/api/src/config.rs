use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::extraction::ExtractionLimits;
use crate::matching::analysis::AnalysisLimits;

const DEFAULT_EXTRACT_MODEL: &str = "google/gemini-2.5-flash";
const DEFAULT_SUMMARY_MODEL: &str = "google/gemini-2.5-flash-lite";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// OpenAI-compatible chat completions URL. Unset disables text recovery and summaries.
    pub ai_api_url: Option<String>,
    pub ai_api_key: Option<String>,
    pub ai_extract_model: String,
    pub ai_summary_model: String,
    pub ai_timeout_secs: u64,
    /// Attempts per chat call, including the first.
    pub ai_max_retries: u32,
    pub max_upload_bytes: usize,
    pub max_text_chars: usize,
    pub max_recommendations: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: parse_var(&lookup, "PORT", 8080)?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            ai_api_url: optional("AI_API_URL"),
            ai_api_key: optional("AI_API_KEY"),
            ai_extract_model: optional("AI_EXTRACT_MODEL")
                .unwrap_or_else(|| DEFAULT_EXTRACT_MODEL.to_string()),
            ai_summary_model: optional("AI_SUMMARY_MODEL")
                .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string()),
            ai_timeout_secs: parse_var(&lookup, "AI_TIMEOUT_SECS", 30)?,
            ai_max_retries: parse_var(&lookup, "AI_MAX_RETRIES", 3)?,
            max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            max_text_chars: parse_var(&lookup, "MAX_TEXT_CHARS", 15_000)?,
            max_recommendations: parse_var(&lookup, "MAX_RECOMMENDATIONS", 10)?,
        })
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }

    pub fn extraction_limits(&self) -> ExtractionLimits {
        ExtractionLimits {
            max_text_chars: self.max_text_chars,
            recovery_timeout: self.ai_timeout(),
        }
    }

    pub fn analysis_limits(&self) -> AnalysisLimits {
        AnalysisLimits {
            max_recommendations: self.max_recommendations,
            summary_timeout: self.ai_timeout(),
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number (got '{raw}')")),
        None => Ok(default),
    }
}
