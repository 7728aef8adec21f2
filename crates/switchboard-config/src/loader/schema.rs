//! Schema validation for Switchboard config documents.
//!
//! Runs against the generic value tree before typed decoding so that every
//! failure names the offending key path.

use crate::ConfigError;
use serde_json::{Map, Value};

/// Validate a whole config document against the schema.
pub(super) fn validate_document(value: &Value, label: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, label, "")?;
    ensure_allowed_keys(map, &["app", "routing", "providers", "prompts"], label, "")?;

    validate_app(require(map, "app", label, "")?, label, "app")?;
    validate_routing(require(map, "routing", label, "")?, label, "routing")?;

    let providers = expect_object(require(map, "providers", label, "")?, label, "providers")?;
    for (name, provider) in providers {
        validate_provider(provider, label, &join_path("providers", name))?;
    }

    let prompts = expect_object(require(map, "prompts", label, "")?, label, "prompts")?;
    for (name, prompt) in prompts {
        validate_prompt(prompt, label, &join_path("prompts", name))?;
    }

    Ok(())
}

/// Validate the "app" block.
fn validate_app(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, label, path)?;
    ensure_allowed_keys(map, &["name", "environment"], label, path)?;

    for key in ["name", "environment"] {
        expect_string(require(map, key, label, path)?, label, &join_path(path, key))?;
    }
    Ok(())
}

/// Validate the "routing" block.
fn validate_routing(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, label, path)?;
    ensure_allowed_keys(map, &["providers", "fallback_on", "tokens"], label, path)?;

    for key in ["providers", "fallback_on"] {
        validate_string_array(require(map, key, label, path)?, label, &join_path(path, key))?;
    }
    validate_tokens(
        require(map, "tokens", label, path)?,
        label,
        &join_path(path, "tokens"),
    )
}

/// Validate the "routing.tokens" block.
fn validate_tokens(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, label, path)?;
    let keys = ["max_output_tokens", "max_input_tokens"];
    ensure_allowed_keys(map, &keys, label, path)?;

    for key in keys {
        expect_positive_int(require(map, key, label, path)?, label, &join_path(path, key))?;
    }
    Ok(())
}

/// Validate a single provider entry.
fn validate_provider(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, label, path)?;
    ensure_allowed_keys(
        map,
        &[
            "type",
            "model",
            "timeout_ms",
            "api_key_env",
            "base_url",
            "params",
        ],
        label,
        path,
    )?;

    for key in ["type", "model"] {
        expect_string(require(map, key, label, path)?, label, &join_path(path, key))?;
    }
    expect_positive_int(
        require(map, "timeout_ms", label, path)?,
        label,
        &join_path(path, "timeout_ms"),
    )?;

    for key in ["api_key_env", "base_url"] {
        if let Some(value) = optional(map, key) {
            expect_string(value, label, &join_path(path, key))?;
        }
    }
    if let Some(value) = optional(map, "params") {
        validate_params(value, label, &join_path(path, "params"))?;
    }
    Ok(())
}

/// Validate a provider's sampling parameters.
fn validate_params(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, label, path)?;
    ensure_allowed_keys(map, &["temperature", "top_p"], label, path)?;

    expect_f64(
        require(map, "temperature", label, path)?,
        label,
        &join_path(path, "temperature"),
    )?;
    if let Some(value) = optional(map, "top_p") {
        expect_f64(value, label, &join_path(path, "top_p"))?;
    }
    Ok(())
}

/// Validate a single prompt entry.
fn validate_prompt(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, label, path)?;
    ensure_allowed_keys(map, &["system_path", "user_path", "schema_path"], label, path)?;

    for key in ["system_path", "user_path"] {
        expect_string(require(map, key, label, path)?, label, &join_path(path, key))?;
    }
    if let Some(value) = optional(map, "schema_path") {
        expect_string(value, label, &join_path(path, "schema_path"))?;
    }
    Ok(())
}

/// Fetch a required key or report it missing.
fn require<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    label: &str,
    path: &str,
) -> Result<&'a Value, ConfigError> {
    map.get(key)
        .ok_or_else(|| invalid_field(label, &join_path(path, key), "missing required field"))
}

/// Fetch an optional key; an explicit null counts as absent.
fn optional<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

/// Expect a JSON object or return a typed error.
fn expect_object<'a>(
    value: &'a Value,
    label: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_field(label, path, "expected mapping")),
    }
}

/// Expect a JSON string or return a typed error.
fn expect_string(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    if value.as_str().is_some() {
        Ok(())
    } else {
        Err(invalid_field(label, path, "expected string"))
    }
}

/// Expect an integer greater than zero.
fn expect_positive_int(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    match value.as_u64() {
        Some(0) => Err(invalid_field(label, path, "expected positive integer, got 0")),
        Some(_) => Ok(()),
        None if value.is_i64() => Err(invalid_field(
            label,
            path,
            "expected positive integer, got negative",
        )),
        None => Err(invalid_field(label, path, "expected positive integer")),
    }
}

/// Expect any JSON number; integers are accepted as floats.
fn expect_f64(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_number() {
        Ok(())
    } else {
        Err(invalid_field(label, path, "expected number"))
    }
}

/// Validate that a value is an array of non-empty strings.
fn validate_string_array(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    let arr = match value {
        Value::Array(arr) => arr,
        _ => return Err(invalid_field(label, path, "expected list")),
    };
    for (idx, entry) in arr.iter().enumerate() {
        match entry.as_str() {
            Some(s) if !s.trim().is_empty() => {}
            Some(_) => {
                return Err(invalid_field(
                    label,
                    &format!("{path}[{idx}]"),
                    "expected non-empty string",
                ));
            }
            None => {
                return Err(invalid_field(
                    label,
                    &format!("{path}[{idx}]"),
                    "expected string",
                ));
            }
        }
    }
    Ok(())
}

/// Ensure an object contains only allowed keys.
fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    label: &str,
    path: &str,
) -> Result<(), ConfigError> {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(invalid_field(label, &join_path(path, key), "unknown key"));
        }
    }
    Ok(())
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(label: &str, path: &str, message: &str) -> ConfigError {
    let normalized_path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: format!("{label}:{normalized_path}"),
        message: message.to_string(),
    }
}
