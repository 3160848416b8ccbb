//! Configuration error types.

use thiserror::Error;

use crate::lookup::LookupError;
use crate::summary::SummaryError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A strategy variable named an unknown strategy.
    #[error("invalid {name} '{value}': {reason}")]
    InvalidStrategy {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("upload limit must be greater than zero")]
    InvalidUploadLimit,

    #[error("lookup configuration: {0}")]
    Lookup(#[from] LookupError),

    #[error("summary configuration: {0}")]
    Summary(#[from] SummaryError),
}
