//! Config loader.
//!
//! Reads a single config document, validates its shape against the schema,
//! decodes it into typed records, and checks cross-field references.

mod document;
mod schema;

#[cfg(test)]
mod tests;

use crate::{ConfigError, RootConfig};
use log::{debug, info};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Config filename used when the caller does not supply one.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Label used in error paths for documents loaded from memory.
const INLINE_LABEL: &str = "inline";

/// Syntax of a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// YAML (the default).
    #[default]
    Yaml,
    /// JSON or JSON5.
    Json5,
}

impl ConfigFormat {
    /// Pick the syntax from a file extension; unknown extensions read as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") | Some("json5") => Self::Json5,
            _ => Self::Yaml,
        }
    }
}

/// Load and validate the config at `path`.
pub fn load_config(path: impl AsRef<Path>) -> Result<RootConfig, ConfigError> {
    RootConfig::load_from_path(path)
}

/// Load and validate [`DEFAULT_CONFIG_FILE`] from the current directory.
pub fn load_default_config() -> Result<RootConfig, ConfigError> {
    RootConfig::load_from_path(DEFAULT_CONFIG_FILE)
}

impl RootConfig {
    /// Load a config from a path, choosing the syntax by file extension.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config from path: {}", path.display());
        let contents = document::read_document(path)?;
        let label = path.display().to_string();
        let value = document::parse_document(&contents, ConfigFormat::from_path(path), &label)?;
        let config = config_from_value(value, &label)?;
        info!(
            "config loaded (app={}, providers={}, prompts={})",
            config.app.name,
            config.providers.len(),
            config.prompts.len()
        );
        Ok(config)
    }

    /// Load a config from in-memory contents.
    pub fn load_from_str(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value = document::parse_document(contents, format, INLINE_LABEL)?;
        config_from_value(value, INLINE_LABEL)
    }

    /// Validate cross-field invariants that the schema cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.routing.providers.is_empty() {
            return Err(ConfigError::Invalid(
                "routing.providers must list at least one provider".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (idx, name) in self.routing.providers.iter().enumerate() {
            if !self.providers.contains_key(name) {
                return Err(ConfigError::Invalid(format!(
                    "routing.providers[{idx}] references undefined provider `{name}`"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "routing.providers[{idx}] repeats `{name}`"
                )));
            }
        }

        let mut seen = HashSet::new();
        for (idx, condition) in self.routing.fallback_on.iter().enumerate() {
            if !seen.insert(condition.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "routing.fallback_on[{idx}] repeats `{condition}`"
                )));
            }
        }

        Ok(())
    }
}

fn config_from_value(value: Value, label: &str) -> Result<RootConfig, ConfigError> {
    schema::validate_document(&value, label)?;
    let config: RootConfig = serde_json::from_value(value)?;
    config.validate()?;
    debug!("config validated (label={label})");
    Ok(config)
}
