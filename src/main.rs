//! ownersync - repair stale owner reference UIDs in exported manifests
//!
//! Walks a directory of exported Kubernetes manifests, resolves every owner
//! reference against the live cluster and rewrites files whose owner UIDs
//! no longer match.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ownersync::cli::{self, ConfigSubcommand};
use ownersync::config::{ConfigLoader, Overrides};
use ownersync::models::OutputFormat;
use std::path::PathBuf;

/// Repair stale owner reference UIDs in exported Kubernetes manifests
#[derive(Parser, Debug)]
#[command(name = "ownersync")]
#[command(about = "Repair stale owner reference UIDs in exported Kubernetes manifests", long_about = None)]
struct Args {
    /// Root directory of the export
    #[arg(long, short = 't', global = true)]
    target: Option<PathBuf>,

    /// Format of the exported files (yaml or json)
    #[arg(long, short = 'o', global = true)]
    output_format: Option<OutputFormat>,

    /// Kubeconfig context to use
    #[arg(long, global = true)]
    context: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let overrides = Overrides {
        target: args.target,
        output_format: args.output_format,
        context: args.context,
    };

    match args.command {
        Some(Command::Config { subcommand }) => {
            return cli::handle_config_command(subcommand, &overrides);
        }
        Some(Command::Version) => {
            cli::display_version();
            return Ok(());
        }
        None => {}
    }

    cli::init_logging(args.debug);

    let config = ConfigLoader::load(&overrides).context("Failed to load configuration")?;
    tracing::debug!(
        "Configuration loaded: target={}, outputFormat={}",
        config.target.display(),
        config.output_format
    );

    let report = ownersync::run(&config).await?;
    report.print().context("Failed to print report")?;

    Ok(())
}
