//! Tests for config loading and validation.

use super::*;
use crate::{ConfigErrorKind, ProviderParams};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const FULL_YAML: &str = r#"
app:
  name: switchboard
  environment: prod
routing:
  providers: [openai, local]
  fallback_on: [timeout, rate_limit]
  tokens:
    max_output_tokens: 1024
    max_input_tokens: 8192
providers:
  openai:
    type: openai
    model: gpt-4.1
    timeout_ms: 30000
    api_key_env: OPENAI_API_KEY
    base_url: https://api.openai.com/v1
    params:
      temperature: 0.2
      top_p: 0.9
  local:
    type: ollama
    model: llama3
    timeout_ms: 60000
prompts:
  summarize:
    system_path: prompts/summarize.system.md
    user_path: prompts/summarize.user.md
    schema_path: prompts/summarize.schema.json
  classify:
    system_path: prompts/classify.system.md
    user_path: prompts/classify.user.md
"#;

fn load_yaml(contents: &str) -> Result<RootConfig, ConfigError> {
    RootConfig::load_from_str(contents, ConfigFormat::Yaml)
}

fn expect_schema_error(contents: &str, needle: &str) {
    let err = load_yaml(contents).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Schema, "{err}");
    let msg = err.to_string();
    assert!(msg.contains(needle), "`{msg}` does not mention `{needle}`");
}

#[test]
fn parses_full_config() {
    let config = load_yaml(FULL_YAML).expect("config");

    assert_eq!(config.app.name, "switchboard");
    assert_eq!(config.app.environment, "prod");
    assert_eq!(config.routing.providers, vec!["openai", "local"]);
    assert_eq!(config.routing.fallback_on, vec!["timeout", "rate_limit"]);
    assert_eq!(config.routing.tokens.max_output_tokens, 1024);
    assert_eq!(config.routing.tokens.max_input_tokens, 8192);

    let openai = config.provider("openai").expect("openai");
    assert_eq!(openai.provider_type, "openai");
    assert_eq!(openai.model, "gpt-4.1");
    assert_eq!(openai.timeout_ms, 30000);
    assert_eq!(openai.api_key_env.as_deref(), Some("OPENAI_API_KEY"));
    assert_eq!(openai.base_url.as_deref(), Some("https://api.openai.com/v1"));
    assert_eq!(
        openai.params,
        Some(ProviderParams {
            temperature: 0.2,
            top_p: Some(0.9),
        })
    );

    let local = config.provider("local").expect("local");
    assert_eq!(local.api_key_env, None);
    assert_eq!(local.base_url, None);
    assert_eq!(local.params, None);

    let summarize = config.prompt("summarize").expect("summarize");
    assert_eq!(
        summarize.schema_path.as_deref(),
        Some("prompts/summarize.schema.json")
    );
    assert_eq!(config.prompt("classify").expect("classify").schema_path, None);
}

#[test]
fn params_without_top_p_leave_it_absent() {
    let yaml = FULL_YAML.replace("      top_p: 0.9\n", "").replace("0.2", "0.7");
    let config = load_yaml(&yaml).expect("config");
    let params = config.provider("openai").and_then(|p| p.params).expect("params");
    assert_eq!(params.temperature, 0.7);
    assert_eq!(params.top_p, None);
}

#[test]
fn integer_temperature_is_accepted() {
    let yaml = FULL_YAML.replace("temperature: 0.2", "temperature: 1");
    let config = load_yaml(&yaml).expect("config");
    let params = config.provider("openai").and_then(|p| p.params).expect("params");
    assert_eq!(params.temperature, 1.0);
}

#[test]
fn explicit_null_optional_is_absent() {
    let yaml = FULL_YAML.replace("base_url: https://api.openai.com/v1", "base_url: ~");
    let config = load_yaml(&yaml).expect("config");
    assert_eq!(config.provider("openai").expect("openai").base_url, None);
}

#[test]
fn rejects_missing_max_input_tokens() {
    let yaml = FULL_YAML.replace("    max_input_tokens: 8192\n", "");
    expect_schema_error(&yaml, "routing.tokens.max_input_tokens");
}

#[test]
fn rejects_missing_section() {
    let start = FULL_YAML.find("prompts:").expect("prompts section");
    expect_schema_error(&FULL_YAML[..start], "prompts: missing required field");
}

#[test]
fn rejects_unknown_top_level_key() {
    let yaml = format!("{FULL_YAML}extra: true\n");
    expect_schema_error(&yaml, "extra: unknown key");
}

#[test]
fn rejects_unknown_provider_key() {
    let yaml = FULL_YAML.replace("    model: llama3\n", "    model: llama3\n    region: eu\n");
    expect_schema_error(&yaml, "providers.local.region");
}

#[test]
fn rejects_non_numeric_timeout() {
    let yaml = FULL_YAML.replace("timeout_ms: 60000", "timeout_ms: soon");
    expect_schema_error(&yaml, "providers.local.timeout_ms: expected positive integer");
}

#[test]
fn rejects_zero_and_negative_limits() {
    let yaml = FULL_YAML.replace("timeout_ms: 60000", "timeout_ms: 0");
    expect_schema_error(&yaml, "got 0");

    let yaml = FULL_YAML.replace("max_output_tokens: 1024", "max_output_tokens: -1");
    expect_schema_error(&yaml, "got negative");
}

#[test]
fn rejects_non_string_scalar_for_string_field() {
    let yaml = FULL_YAML.replace("environment: prod", "environment: 3");
    expect_schema_error(&yaml, "app.environment: expected string");
}

#[test]
fn rejects_params_without_temperature() {
    let yaml = FULL_YAML.replace("      temperature: 0.2\n", "");
    expect_schema_error(&yaml, "providers.openai.params.temperature");
}

#[test]
fn rejects_undefined_routed_provider() {
    let yaml = FULL_YAML.replace("[openai, local]", "[openai, azure]");
    expect_schema_error(&yaml, "undefined provider `azure`");
}

#[test]
fn rejects_duplicate_routed_provider() {
    let yaml = FULL_YAML.replace("[openai, local]", "[openai, openai]");
    expect_schema_error(&yaml, "routing.providers[1] repeats `openai`");
}

#[test]
fn rejects_duplicate_fallback_condition() {
    let yaml = FULL_YAML.replace("[timeout, rate_limit]", "[timeout, timeout]");
    expect_schema_error(&yaml, "routing.fallback_on[1] repeats `timeout`");
}

#[test]
fn rejects_blank_fallback_condition() {
    let yaml = FULL_YAML.replace("[timeout, rate_limit]", "[\" \"]");
    expect_schema_error(&yaml, "routing.fallback_on[0]: expected non-empty string");
}

/// Integers too wide for 64 bits are a bad value, not a malformed document.
#[test]
fn oversized_integer_is_schema_error() {
    let yaml = FULL_YAML.replace("timeout_ms: 60000", "timeout_ms: 99999999999999999999999");
    expect_schema_error(&yaml, "providers.local.timeout_ms");
}

/// A YAML tag on a string field is a type mismatch.
#[test]
fn tagged_string_is_schema_error() {
    let yaml = FULL_YAML.replace("environment: prod", "environment: !env prod");
    expect_schema_error(&yaml, "app.environment: expected string");
}

#[test]
fn rejects_empty_routing() {
    let yaml = FULL_YAML.replace("[openai, local]", "[]");
    expect_schema_error(&yaml, "at least one provider");
}

#[test]
fn malformed_yaml_is_parse_error() {
    let err = load_yaml("app: {name: switchboard\nrouting: [").unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Parse);
}

#[test]
fn json5_matches_yaml() {
    let json5 = r#"{
        app: { name: "switchboard", environment: "prod" },
        routing: {
            providers: ["openai", "local"],
            fallback_on: ["timeout", "rate_limit"],
            tokens: { max_output_tokens: 1024, max_input_tokens: 8192 },
        },
        providers: {
            openai: {
                type: "openai",
                model: "gpt-4.1",
                timeout_ms: 30000,
                api_key_env: "OPENAI_API_KEY",
                base_url: "https://api.openai.com/v1",
                params: { temperature: 0.2, top_p: 0.9 },
            },
            local: { type: "ollama", model: "llama3", timeout_ms: 60000 },
        },
        prompts: {
            summarize: {
                system_path: "prompts/summarize.system.md",
                user_path: "prompts/summarize.user.md",
                schema_path: "prompts/summarize.schema.json",
            },
            classify: {
                system_path: "prompts/classify.system.md",
                user_path: "prompts/classify.user.md",
            },
        },
    }"#;
    let from_json5 = RootConfig::load_from_str(json5, ConfigFormat::Json5).expect("json5");
    let from_yaml = load_yaml(FULL_YAML).expect("yaml");
    assert_eq!(from_json5, from_yaml);
}

#[test]
fn format_follows_extension() {
    assert_eq!(ConfigFormat::from_path("config.yaml"), ConfigFormat::Yaml);
    assert_eq!(ConfigFormat::from_path("config.yml"), ConfigFormat::Yaml);
    assert_eq!(ConfigFormat::from_path("config.JSON5"), ConfigFormat::Json5);
    assert_eq!(ConfigFormat::from_path("config.json"), ConfigFormat::Json5);
    assert_eq!(ConfigFormat::from_path("config"), ConfigFormat::Yaml);
}

#[test]
fn load_from_path_labels_errors_with_path() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&path, FULL_YAML.replace("  name: switchboard\n", "")).expect("write");

    let err = load_config(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains(&path.display().to_string()), "{msg}");
    assert!(msg.contains("app.name: missing required field"), "{msg}");
}

#[test]
fn missing_file_is_not_found() {
    let temp = TempDir::new().expect("tmp");
    let err = load_config(temp.path().join("absent.yaml")).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::NotFound);
    assert!(matches!(err, ConfigError::NotFound { .. }));
}

#[test]
fn routed_providers_follow_routing_order() {
    let config = load_yaml(FULL_YAML).expect("config");
    let names: Vec<&str> = config.routed_providers().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["openai", "local"]);
    assert!(config.routing.falls_back_on("timeout"));
    assert!(!config.routing.falls_back_on("server_error"));
}
