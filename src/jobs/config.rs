use std::env;
use std::time::Duration;

use crate::constants::{DEFAULT_JOB_TTL_SECS, DEFAULT_PACING_DELAY_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Job orchestration settings.
pub struct JobConfig {
    /// How long a finished job stays pollable.
    pub ttl: Duration,
    /// Delay between citations after an external lookup call.
    pub pacing_delay: Duration,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_JOB_TTL_SECS),
            pacing_delay: Duration::from_millis(DEFAULT_PACING_DELAY_MS),
        }
    }
}

impl JobConfig {
    const ENV_TTL_SECS: &'static str = "STRAINER_JOB_TTL_SECS";
    const ENV_PACING_DELAY_MS: &'static str = "STRAINER_PACING_DELAY_MS";

    /// Loads config from environment variables; unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let ttl = env::var(Self::ENV_TTL_SECS)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.ttl);
        let pacing_delay = env::var(Self::ENV_PACING_DELAY_MS)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.pacing_delay);

        Self { ttl, pacing_delay }
    }

    /// Short TTL and no pacing.
    pub fn for_testing() -> Self {
        Self {
            ttl: Duration::from_millis(200),
            pacing_delay: Duration::ZERO,
        }
    }
}
