//! Error types for navigation state and deep-link resolution.

use thiserror::Error;

/// Deep-link parsing and building errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unresolved segment '{segment}' at position {index}")]
    UnresolvedSegment { index: usize, segment: String },

    #[error("Scheme mismatch: expected '{expected}', got '{found}'")]
    SchemeMismatch { expected: String, found: String },
}

impl From<url::ParseError> for LinkError {
    fn from(err: url::ParseError) -> Self {
        LinkError::InvalidUrl(err.to_string())
    }
}

/// Failure reported by an interceptor instead of a yes/no answer.
///
/// The chain treats any of these as a block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterceptorError {
    #[error("Interceptor failed: {0}")]
    Failed(String),

    #[error("Interceptor dependency unavailable: {0}")]
    Unavailable(String),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err.to_string())
    }
}
