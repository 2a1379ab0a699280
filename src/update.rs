//! Owner reference update run
//!
//! Validates the configuration, collects the exported files under the target
//! directory, and reconciles them one by one against the cluster. The first
//! fatal error ends the run and no report is produced.

use crate::cluster::{self, ConnectError, KubeOwnerResolver};
use crate::config::{Config, ConfigError};
use crate::document::{DocumentAccessor, FileDocuments};
use crate::models::OutputFormat;
use crate::owners::{OwnerCache, OwnerResolver};
use crate::reconcile::{ChangeReport, ReconcileError, reconcile_file};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Errors that abort a run
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to walk {}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

/// Run the update against the cluster selected by `config`
pub async fn run(config: &Config) -> Result<ChangeReport, UpdateError> {
    config.validate()?;

    let files = collect_files(&config.target, config.output_format)?;
    tracing::info!(
        "Found {} {} file(s) under {}",
        files.len(),
        config.output_format,
        config.target.display()
    );

    let client = cluster::create_client(config.context.as_deref()).await?;
    let resolver = KubeOwnerResolver::new(client);
    let documents = FileDocuments::new(config.output_format);

    reconcile_files(&config.target, &files, &documents, &resolver).await
}

/// Collect every non-directory entry under `root` with the format's extension
///
/// Traversal is recursive and sorted by file name within each directory.
pub fn collect_files(root: &Path, format: OutputFormat) -> Result<Vec<PathBuf>, UpdateError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| UpdateError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_dir() && format.matches(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Reconcile `files` in order, sharing one owner cache across the run
pub async fn reconcile_files(
    root: &Path,
    files: &[PathBuf],
    documents: &dyn DocumentAccessor,
    resolver: &dyn OwnerResolver,
) -> Result<ChangeReport, UpdateError> {
    let mut cache = OwnerCache::new();
    let mut report = ChangeReport::new();
    let mut rewritten = 0;

    for file in files {
        let outcome = reconcile_file(root, file, documents, resolver, &mut cache).await?;
        if outcome.changed {
            rewritten += 1;
        }
        report.extend(outcome.rows);
    }

    tracing::info!(
        "Processed {} file(s), rewrote {}, resolved {} distinct owner(s)",
        files.len(),
        rewritten,
        cache.len()
    );

    Ok(report)
}
