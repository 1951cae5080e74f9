// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathFilterError {
    /// A revision could not be resolved, the histories are unrelated, or git
    /// itself is unusable in the working directory.
    #[error("Revision resolution error: {0}")]
    RevisionResolution(String),

    #[error("Invalid pattern '{pattern}' in filter '{filter}': {reason}")]
    InvalidPattern {
        filter: String,
        pattern: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PathFilterError>;
