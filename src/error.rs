//! Error types for the fallible edges of the crate.
//!
//! The tracking core itself never fails; these cover configuration loading,
//! frame decoding and session control.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// Buffer length does not match `width * height * channels`.
    #[error("invalid input dimensions: expected {expected:?}, got {got} bytes")]
    InvalidInputDimensions {
        expected: (u32, u32, u32),
        got: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("tracking session already stopped")]
    AlreadyStopped,
}
