//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{defaults, paths, schema::Config};
use crate::models::OutputFormat;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Values given on the command line, applied last
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub target: Option<PathBuf>,
    pub output_format: Option<OutputFormat>,
    pub context: Option<String>,
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Command line overrides
    /// 2. Environment variable overrides
    /// 3. Root config file
    /// 4. Built-in defaults
    pub fn load(overrides: &Overrides) -> Result<Config> {
        let mut config = Self::load_defaults();

        let root_path = paths::root_config_path();
        if root_path.exists() {
            config = Self::load_file(&root_path)?;
        }

        config = Self::apply_env_overrides(config)?;
        Ok(Self::apply_overrides(config, overrides))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Result<Config> {
        if let Ok(target) = std::env::var("OWNERSYNC_TARGET") {
            config.target = PathBuf::from(target);
        }

        if let Ok(format) = std::env::var("OWNERSYNC_OUTPUT_FORMAT") {
            config.output_format = format
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("Invalid OWNERSYNC_OUTPUT_FORMAT")?;
        }

        if let Ok(context) = std::env::var("OWNERSYNC_CONTEXT") {
            config.context = if context.is_empty() { None } else { Some(context) };
        }

        Ok(config)
    }

    /// Apply command line overrides
    pub fn apply_overrides(mut config: Config, overrides: &Overrides) -> Config {
        if let Some(target) = &overrides.target {
            config.target = target.clone();
        }
        if let Some(format) = overrides.output_format {
            config.output_format = format;
        }
        if let Some(context) = &overrides.context {
            config.context = Some(context.clone());
        }
        config
    }
}
