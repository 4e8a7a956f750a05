//! Error types for the calculator core and its configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the calculator core.
///
/// Only [`CalcError::DivideByZero`] comes out of the evaluator. The state
/// machine absorbs it into a reset, so callers dispatching intents never
/// see it. The other variants belong to the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Can't divide by zero")]
    DivideByZero,

    #[error("Unknown key: {0:?}")]
    UnknownKey(String),

    #[error("Unknown session: {0}")]
    UnknownSession(u64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config at {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}
