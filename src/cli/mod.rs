//! CLI command handling module
//!
//! Handles all CLI subcommands and logging setup.

mod config;
mod logging;
mod version;

pub use config::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use version::display_version;
