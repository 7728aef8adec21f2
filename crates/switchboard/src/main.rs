//! Operator CLI: load a config file and report whether it is usable.

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::{Path, PathBuf};
use switchboard::config::{DEFAULT_CONFIG_FILE, load_config};
use switchboard::{init_logging, report};

/// Output format for a successfully loaded config.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Command-line options for the config checker.
#[derive(Parser)]
#[command(name = "switchboard", version)]
struct Cli {
    /// Path to the config file (YAML, or JSON5 by extension)
    #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Fail if any prompt file reference does not exist
    #[arg(long)]
    check_prompts: bool,
    /// How to print the loaded config
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    debug!("cli options: config={}", cli.config.display());

    let config = load_config(&cli.config).map_err(|err| {
        let kind = err.kind();
        anyhow::Error::new(err).context(format!(
            "{kind}: could not load {}",
            cli.config.display()
        ))
    })?;

    if cli.check_prompts {
        let base_dir = cli.config.parent().unwrap_or(Path::new("."));
        let missing = report::missing_prompt_files(&config, base_dir);
        if !missing.is_empty() {
            for (prompt, path) in &missing {
                eprintln!("prompt {prompt}: missing {}", path.display());
            }
            bail!("{} prompt file(s) missing", missing.len());
        }
        info!("all prompt files present");
    }

    match cli.format {
        OutputFormat::Text => print!("{}", report::Summary(&config)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config).context("failed to encode config")?;
            println!("{json}");
        }
    }
    Ok(())
}
