use std::env;
use std::time::Duration;

use super::error::{LookupError, LookupResult};

/// CourtListener v4 search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://www.courtlistener.com/api/rest/v4/search/";
/// Default per-request timeout for the lookup service.
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 30;
/// Default number of cached lookup outcomes.
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;
/// Default lifetime of a cached lookup outcome.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
/// Authoritative lookup configuration.
pub struct LookupConfig {
    /// If false, the verification policy skips the lookup stage.
    pub enabled: bool,
    /// Search endpoint URL.
    pub search_url: String,
    /// API token sent as `Authorization: Token <token>`.
    pub token: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum cached outcomes (0 disables caching).
    pub cache_capacity: u64,
    /// Time-to-live of cached outcomes.
    pub cache_ttl: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl LookupConfig {
    const ENV_ENABLED: &'static str = "STRAINER_LOOKUP_ENABLED";
    const ENV_URL: &'static str = "STRAINER_LOOKUP_URL";
    const ENV_TOKEN: &'static str = "STRAINER_LOOKUP_TOKEN";
    const ENV_TOKEN_FALLBACK: &'static str = "COURTLISTENER_API_KEY";
    const ENV_TIMEOUT_SECS: &'static str = "STRAINER_LOOKUP_TIMEOUT_SECS";
    const ENV_CACHE_CAPACITY: &'static str = "STRAINER_LOOKUP_CACHE_CAPACITY";
    const ENV_CACHE_TTL_SECS: &'static str = "STRAINER_LOOKUP_CACHE_TTL_SECS";

    /// Loads config from environment variables (with defaults).
    pub fn from_env() -> LookupResult<Self> {
        let defaults = Self::default();

        let enabled = env::var(Self::ENV_ENABLED)
            .map(|s| s != "false" && s != "0")
            .unwrap_or(defaults.enabled);
        let search_url = env::var(Self::ENV_URL).unwrap_or(defaults.search_url);
        let token = env::var(Self::ENV_TOKEN)
            .or_else(|_| env::var(Self::ENV_TOKEN_FALLBACK))
            .ok()
            .filter(|t| !t.trim().is_empty());
        let timeout = env::var(Self::ENV_TIMEOUT_SECS)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        let cache_capacity = env::var(Self::ENV_CACHE_CAPACITY)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.cache_capacity);
        let cache_ttl = env::var(Self::ENV_CACHE_TTL_SECS)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);

        let config = Self {
            enabled,
            search_url,
            token,
            timeout,
            cache_capacity,
            cache_ttl,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LookupResult<()> {
        if self.enabled && self.search_url.trim().is_empty() {
            return Err(LookupError::Config(format!(
                "{} must not be empty",
                Self::ENV_URL
            )));
        }
        if self.timeout.is_zero() {
            return Err(LookupError::Config("lookup timeout must be positive".into()));
        }
        Ok(())
    }

    /// Returns `true` if lookup outcomes should be cached.
    pub fn caching_enabled(&self) -> bool {
        self.cache_capacity > 0 && !self.cache_ttl.is_zero()
    }
}
