//! Configuration system for ownersync
//!
//! Layers built-in defaults, the root config file, environment variables and
//! command line flags into a single [`Config`].

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::{ConfigLoader, Overrides};
pub use schema::{Config, ConfigError};
