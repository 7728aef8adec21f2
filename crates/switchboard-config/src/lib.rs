//! Configuration models and loading for Switchboard.
//!
//! This crate owns the routing/provider/prompt config schema and the loader
//! that turns a YAML or JSON5 document into validated typed records.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::{ConfigError, ConfigErrorKind};
/// Loader entry points and document formats.
pub use loader::{ConfigFormat, DEFAULT_CONFIG_FILE, load_config, load_default_config};
/// Configuration schema models.
pub use model::*;
