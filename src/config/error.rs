//! Errors raised while loading and checking settings.

use thiserror::Error;

/// Loading failed before any value was checked.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Could not read .env file: {0}")]
    DotEnv(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A loaded value is out of range or inconsistent.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Too many drafting retries (max 5)")]
    TooManyRetries,

    #[error("Upload size limit must be between 1 byte and 20 MiB")]
    InvalidUploadLimit,

    #[error("Invalid API token list: {0}")]
    InvalidApiTokens(String),

    #[error("At least one API token is required in production")]
    NoApiTokens,
}
