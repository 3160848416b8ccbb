//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `STRAINER_*` environment variables.
//! Collaborator settings live with their modules ([`LookupConfig`], [`SummaryConfig`],
//! [`JobConfig`]) and are loaded here as part of [`Config::from_env`].

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

use crate::citation::ExtractionStrategy;
use crate::constants::DEFAULT_MAX_UPLOAD_BYTES;
use crate::jobs::JobConfig;
use crate::lookup::LookupConfig;
use crate::scoring::SimilarityStrategy;
use crate::summary::SummaryConfig;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `STRAINER_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `5000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Largest accepted request body. Default: 100 MiB.
    pub max_upload_bytes: usize,

    /// Citation extraction strategy. Default: `structured`.
    pub extraction_strategy: ExtractionStrategy,

    /// Similarity strategy. Default: `tfidf`.
    pub similarity_strategy: SimilarityStrategy,

    /// Use in-process lookup and summary collaborators instead of remote services.
    pub mock_provider: bool,

    pub lookup: LookupConfig,
    pub summary: SummaryConfig,
    pub jobs: JobConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            extraction_strategy: ExtractionStrategy::default(),
            similarity_strategy: SimilarityStrategy::default(),
            mock_provider: false,
            lookup: LookupConfig::default(),
            summary: SummaryConfig::default(),
            jobs: JobConfig::default(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "STRAINER_PORT";
    const ENV_BIND_ADDR: &'static str = "STRAINER_BIND_ADDR";
    const ENV_MAX_UPLOAD_BYTES: &'static str = "STRAINER_MAX_UPLOAD_BYTES";
    const ENV_EXTRACTION_STRATEGY: &'static str = "STRAINER_EXTRACTION_STRATEGY";
    const ENV_SIMILARITY_STRATEGY: &'static str = "STRAINER_SIMILARITY_STRATEGY";
    const ENV_MOCK_PROVIDER: &'static str = "STRAINER_MOCK_PROVIDER";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let max_upload_bytes =
            Self::parse_usize_from_env(Self::ENV_MAX_UPLOAD_BYTES, defaults.max_upload_bytes);
        let extraction_strategy =
            Self::parse_strategy_from_env(Self::ENV_EXTRACTION_STRATEGY, defaults.extraction_strategy)?;
        let similarity_strategy =
            Self::parse_strategy_from_env(Self::ENV_SIMILARITY_STRATEGY, defaults.similarity_strategy)?;
        let mock_provider = Self::parse_bool_from_env(Self::ENV_MOCK_PROVIDER, defaults.mock_provider);

        Ok(Self {
            port,
            bind_addr,
            max_upload_bytes,
            extraction_strategy,
            similarity_strategy,
            mock_provider,
            lookup: LookupConfig::from_env()?,
            summary: SummaryConfig::from_env()?,
            jobs: JobConfig::from_env(),
        })
    }

    /// Validates invariants not covered by parsing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidUploadLimit);
        }
        self.lookup.validate()?;
        self.summary.validate()?;
        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_strategy_from_env<S>(var_name: &'static str, default: S) -> Result<S, ConfigError>
    where
        S: std::str::FromStr<Err = String>,
    {
        match env::var(var_name) {
            Ok(value) if !value.trim().is_empty() => value
                .parse()
                .map_err(|reason| ConfigError::InvalidStrategy {
                    name: var_name,
                    value,
                    reason,
                }),
            _ => Ok(default),
        }
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        match env::var(var_name) {
            Ok(value) => matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ),
            Err(_) => default,
        }
    }
}
