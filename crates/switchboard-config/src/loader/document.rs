//! Reading and parsing config documents into a generic JSON value.

use super::ConfigFormat;
use crate::ConfigError;
use log::debug;
use serde::de::IgnoredAny;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a config file from disk as UTF-8 text.
pub(super) fn read_document(path: &Path) -> Result<String, ConfigError> {
    debug!("reading config document (path={})", path.display());
    fs::read_to_string(path).map_err(|source| ConfigError::NotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse document contents into a generic value tree.
///
/// Both syntaxes land in `serde_json::Value` so schema validation and decoding
/// are shared. YAML is syntax-checked on its own first so that only
/// malformed documents are reported as parse errors.
pub(super) fn parse_document(
    contents: &str,
    format: ConfigFormat,
    label: &str,
) -> Result<Value, ConfigError> {
    debug!(
        "parsing config document (label={}, format={:?}, len={})",
        label,
        format,
        contents.len()
    );
    match format {
        ConfigFormat::Yaml => {
            serde_yaml::from_str::<IgnoredAny>(contents).map_err(|source| {
                ConfigError::ParseYaml {
                    label: label.to_string(),
                    source,
                }
            })?;
            yaml_to_json(contents, label)
        }
        ConfigFormat::Json5 => json5::from_str(contents).map_err(|source| ConfigError::ParseJson5 {
            label: label.to_string(),
            source,
        }),
    }
}

/// Convert a well-formed YAML document into the generic JSON tree.
///
/// Tagged values become single-entry mappings so they surface as type errors
/// in schema validation. Values the YAML tree cannot hold (integers past
/// 64 bits, duplicate keys) or JSON cannot represent (sequences used as
/// mapping keys) are field errors, not parse errors.
fn yaml_to_json(contents: &str, label: &str) -> Result<Value, ConfigError> {
    let raw: serde_yaml::Value =
        serde_yaml::from_str(contents).map_err(|err| unsupported_value(label, err))?;
    serde_json::to_value(raw).map_err(|err| unsupported_value(label, err))
}

fn unsupported_value(label: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidField {
        path: format!("{label}:root"),
        message: format!("unsupported value: {err}"),
    }
}
