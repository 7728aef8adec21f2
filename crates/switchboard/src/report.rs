//! Human-readable summaries of a loaded config.

use std::fmt;
use std::path::{Path, PathBuf};
use switchboard_config::RootConfig;

/// Multi-line summary of the app, routing order, providers and prompts.
pub struct Summary<'a>(pub &'a RootConfig);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.0;
        writeln!(f, "app: {} ({})", config.app.name, config.app.environment)?;
        writeln!(f, "routing: {}", config.routing.providers.join(" -> "))?;
        if !config.routing.fallback_on.is_empty() {
            writeln!(f, "fallback on: {}", config.routing.fallback_on.join(", "))?;
        }
        let tokens = &config.routing.tokens;
        writeln!(
            f,
            "tokens: input<={} output<={}",
            tokens.max_input_tokens, tokens.max_output_tokens
        )?;
        for (name, provider) in &config.providers {
            write!(
                f,
                "provider {name}: {} {} timeout={}ms",
                provider.provider_type, provider.model, provider.timeout_ms
            )?;
            if let Some(env) = &provider.api_key_env {
                write!(f, " key=${env}")?;
            }
            writeln!(f)?;
        }
        for name in config.prompts.keys() {
            writeln!(f, "prompt {name}")?;
        }
        Ok(())
    }
}

/// Prompt file references that do not exist, keyed by prompt name.
pub fn missing_prompt_files(config: &RootConfig, base_dir: &Path) -> Vec<(String, PathBuf)> {
    config
        .prompts
        .iter()
        .flat_map(|(name, prompt)| {
            prompt
                .missing_files(base_dir)
                .into_iter()
                .map(move |path| (name.clone(), path))
        })
        .collect()
}
