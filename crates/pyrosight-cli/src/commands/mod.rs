pub mod aim;
pub mod config;
pub mod detect;

use std::path::Path;

use anyhow::{Context, Result};
use pyrosight_core::config::PyroConfig;

/// Read a TOML session config, or fall back to defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<PyroConfig> {
    let config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => PyroConfig::default(),
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}
