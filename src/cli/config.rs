//! Configuration subcommand handling

use crate::config::{Config, ConfigLoader, Overrides, paths};
use anyhow::{Context, Result};
use clap::Subcommand;

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSubcommand {
    /// Show configuration file path
    Path,
    /// Print the effective configuration
    Show,
    /// Validate the effective configuration
    Validate,
}

/// Handle a configuration subcommand
pub fn handle_config_command(cmd: ConfigSubcommand, overrides: &Overrides) -> Result<()> {
    match cmd {
        ConfigSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
        }
        ConfigSubcommand::Show => {
            let config = ConfigLoader::load(overrides).context("Failed to load configuration")?;
            print!("{}", render_config(&config)?);
        }
        ConfigSubcommand::Validate => {
            let config = ConfigLoader::load(overrides).context("Failed to load configuration")?;
            config
                .validate()
                .context("Configuration validation failed")?;
            println!("Configuration is valid");
        }
    }

    Ok(())
}

fn render_config(config: &Config) -> Result<String> {
    serde_yaml::to_string(config).context("Failed to serialize configuration")
}
