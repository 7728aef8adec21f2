//! Configuration schema for Switchboard.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Root config: application identity, routing policy, providers and prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RootConfig {
    pub app: AppConfig,
    pub routing: RoutingConfig,
    pub providers: BTreeMap<String, ProviderConfig>,
    pub prompts: BTreeMap<String, PromptConfig>,
}

impl RootConfig {
    /// Look up a provider by name.
    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }

    /// Look up a prompt by name.
    pub fn prompt(&self, name: &str) -> Option<&PromptConfig> {
        self.prompts.get(name)
    }

    /// Providers in routing order, skipping names with no matching entry.
    ///
    /// A validated config has an entry for every routed name.
    pub fn routed_providers(&self) -> impl Iterator<Item = (&str, &ProviderConfig)> {
        self.routing
            .providers
            .iter()
            .filter_map(move |name| self.providers.get(name).map(|cfg| (name.as_str(), cfg)))
    }
}

/// Application identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub name: String,
    /// Deployment tier label, e.g. `dev` or `prod`.
    pub environment: String,
}

/// Which providers to try, in what order, and when to move on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Provider names in the order they are tried.
    pub providers: Vec<String>,
    /// Condition names (e.g. `timeout`, `rate_limit`) that trigger fallback.
    pub fallback_on: Vec<String>,
    pub tokens: TokenLimits,
}

impl RoutingConfig {
    /// Whether the named condition triggers a fallback.
    pub fn falls_back_on(&self, condition: &str) -> bool {
        self.fallback_on.iter().any(|c| c == condition)
    }
}

/// Token budgets applied to every routed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenLimits {
    pub max_output_tokens: u64,
    pub max_input_tokens: u64,
}

/// Connection and invocation settings for one model provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Vendor discriminator, e.g. `openai` or `anthropic`.
    #[serde(rename = "type")]
    pub provider_type: String,
    pub model: String,
    pub timeout_ms: u64,
    /// Name of the environment variable holding the credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ProviderParams>,
}

/// Sampling parameters passed to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderParams {
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

/// File references for a named prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptConfig {
    pub system_path: String,
    pub user_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<String>,
}

impl PromptConfig {
    /// All referenced paths, relative ones resolved against `base_dir`.
    pub fn resolved_paths(&self, base_dir: &Path) -> Vec<PathBuf> {
        [
            Some(self.system_path.as_str()),
            Some(self.user_path.as_str()),
            self.schema_path.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(|path| {
            let path = Path::new(path);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                base_dir.join(path)
            }
        })
        .collect()
    }

    /// Referenced files that do not exist on disk.
    pub fn missing_files(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.resolved_paths(base_dir)
            .into_iter()
            .filter(|path| !path.is_file())
            .collect()
    }
}
