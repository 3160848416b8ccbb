use std::env;
use std::time::Duration;

use super::error::{SummaryError, SummaryResult};

/// OpenAI-compatible API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4";
/// Sampling temperature for summaries.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Completion token cap per summary.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
/// Attempts per summary, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Delay before the first retry; doubles on each further retry.
pub const DEFAULT_BACKOFF_MS: u64 = 2000;
/// Per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
/// Summary generator configuration.
pub struct SummaryConfig {
    /// API base URL (`/chat/completions` is appended).
    pub base_url: String,
    /// Bearer token. `None` selects the offline generator.
    pub api_key: Option<String>,
    /// Model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Attempts per summary.
    pub max_attempts: u32,
    /// Base retry delay.
    pub backoff: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Duration::from_millis(DEFAULT_BACKOFF_MS),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl SummaryConfig {
    const ENV_BASE_URL: &'static str = "STRAINER_LLM_BASE_URL";
    const ENV_API_KEY: &'static str = "STRAINER_LLM_API_KEY";
    const ENV_API_KEY_FALLBACK: &'static str = "OPENAI_API_KEY";
    const ENV_MODEL: &'static str = "STRAINER_LLM_MODEL";
    const ENV_MAX_ATTEMPTS: &'static str = "STRAINER_LLM_MAX_ATTEMPTS";
    const ENV_BACKOFF_MS: &'static str = "STRAINER_LLM_BACKOFF_MS";
    const ENV_TIMEOUT_SECS: &'static str = "STRAINER_LLM_TIMEOUT_SECS";

    /// Loads config from environment variables (with defaults).
    pub fn from_env() -> SummaryResult<Self> {
        let defaults = Self::default();

        let base_url = env::var(Self::ENV_BASE_URL).unwrap_or(defaults.base_url);
        let api_key = env::var(Self::ENV_API_KEY)
            .or_else(|_| env::var(Self::ENV_API_KEY_FALLBACK))
            .ok()
            .filter(|k| !k.trim().is_empty());
        let model = env::var(Self::ENV_MODEL).unwrap_or(defaults.model);
        let max_attempts = env::var(Self::ENV_MAX_ATTEMPTS)
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.max_attempts);
        let backoff = env::var(Self::ENV_BACKOFF_MS)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.backoff);
        let timeout = env::var(Self::ENV_TIMEOUT_SECS)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let config = Self {
            base_url,
            api_key,
            model,
            max_attempts,
            backoff,
            timeout,
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SummaryResult<()> {
        if self.max_attempts == 0 {
            return Err(SummaryError::Config(format!(
                "{} must be at least 1",
                Self::ENV_MAX_ATTEMPTS
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(SummaryError::Config(format!(
                "{} must not be empty",
                Self::ENV_BASE_URL
            )));
        }
        if self.model.trim().is_empty() {
            return Err(SummaryError::Config(format!(
                "{} must not be empty",
                Self::ENV_MODEL
            )));
        }
        Ok(())
    }

    /// Returns `true` if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Full chat-completions endpoint URL.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Delay before retry number `retry` (1-based): `backoff · 2^(retry − 1)`.
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.backoff.saturating_mul(factor)
    }
}
