//! Error types for config loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while loading or validating config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file is missing or could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The document is not well-formed YAML.
    #[error("failed to parse config {label}: {source}")]
    ParseYaml {
        label: String,
        #[source]
        source: serde_yaml::Error,
    },
    /// The document is not well-formed JSON5.
    #[error("failed to parse config {label}: {source}")]
    ParseJson5 {
        label: String,
        #[source]
        source: json5::Error,
    },
    /// A specific field failed validation.
    #[error("invalid config at {path}: {message}")]
    InvalidField { path: String, message: String },
    /// Converting the validated document into typed records failed.
    #[error("failed to decode config: {0}")]
    Decode(#[from] serde_json::Error),
    /// Cross-field validation failure.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Coarse classification of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// Path missing or unreadable.
    NotFound,
    /// Document is not well-formed.
    Parse,
    /// Document is well-formed but does not match the schema.
    Schema,
}

impl ConfigError {
    /// Classify the error for callers that only care about the failure class.
    pub fn kind(&self) -> ConfigErrorKind {
        match self {
            Self::NotFound { .. } => ConfigErrorKind::NotFound,
            Self::ParseYaml { .. } | Self::ParseJson5 { .. } => ConfigErrorKind::Parse,
            Self::InvalidField { .. } | Self::Decode(_) | Self::Invalid(_) => {
                ConfigErrorKind::Schema
            }
        }
    }
}

impl std::fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NotFound => "not found",
            Self::Parse => "parse error",
            Self::Schema => "schema error",
        };
        f.write_str(label)
    }
}
