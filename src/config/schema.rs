//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use crate::models::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration validation errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("target directory must not be empty")]
    EmptyTarget,

    #[error("target directory does not exist: {}", .0.display())]
    TargetMissing(PathBuf),

    #[error("target is not a directory: {}", .0.display())]
    TargetNotDirectory(PathBuf),
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Root directory of the export to reconcile
    #[serde(default = "default_target")]
    pub target: PathBuf,

    /// Format of the exported files
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Kubeconfig context to use instead of the current one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: default_target(),
            output_format: OutputFormat::default(),
            context: None,
        }
    }
}

impl Config {
    /// Check that the configuration can drive a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.as_os_str().is_empty() {
            return Err(ConfigError::EmptyTarget);
        }
        if !self.target.exists() {
            return Err(ConfigError::TargetMissing(self.target.clone()));
        }
        if !self.target.is_dir() {
            return Err(ConfigError::TargetNotDirectory(self.target.clone()));
        }
        Ok(())
    }
}

fn default_target() -> PathBuf {
    PathBuf::from("exports")
}
