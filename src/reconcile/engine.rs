//! Per-file owner reference reconciliation

use super::report::ReportRow;
use crate::document::{DocumentAccessor, DocumentError};
use crate::owners::{OwnerCache, OwnerResolver, ResolveError};
use std::path::Path;

/// Errors that abort the whole run
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Result of reconciling a single file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOutcome {
    /// Whether any owner UID was corrected and the file rewritten
    pub changed: bool,
    /// Corrected and unresolved references, in declaration order
    pub rows: Vec<ReportRow>,
}

/// Path of `file` relative to `root`, as shown in the report
pub fn display_path(root: &Path, file: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .display()
        .to_string()
}

/// Reconcile the owner references of one exported file
///
/// Every owner reference is resolved in the namespace of the object that
/// carries it. Unresolvable owners are reported and skipped; UIDs that differ
/// from the live owner are replaced, and the file is written back once if
/// anything changed. Read and write failures and malformed apiVersions abort.
pub async fn reconcile_file(
    root: &Path,
    path: &Path,
    documents: &dyn DocumentAccessor,
    resolver: &dyn OwnerResolver,
    cache: &mut OwnerCache,
) -> Result<FileOutcome, ReconcileError> {
    let mut object = documents.read(path).await?;
    let mut outcome = FileOutcome::default();

    if object.owner_references().is_empty() {
        tracing::debug!("No owner references in {}", path.display());
        return Ok(outcome);
    }

    let file = display_path(root, path);
    let namespace = object.namespace().to_string();
    let mut refs = object.owner_references().to_vec();

    for reference in refs.iter_mut() {
        let owner = match cache.get_or_resolve(resolver, reference, &namespace).await {
            Ok(owner) => owner,
            Err(err) if err.is_fatal() => return Err(err.into()),
            Err(err) => {
                tracing::warn!(
                    "Could not resolve owner {} {} of {}: {}",
                    reference.kind,
                    reference.name,
                    file,
                    err
                );
                outcome.rows.push(ReportRow::unresolved(&file, reference, &err));
                continue;
            }
        };

        let live_uid = owner.metadata.uid.as_deref().unwrap_or_default();
        if reference.uid != live_uid {
            tracing::debug!(
                "Owner {} {} of {} changed uid: {} -> {}",
                reference.kind,
                reference.name,
                file,
                reference.uid,
                live_uid
            );
            outcome
                .rows
                .push(ReportRow::corrected(&file, reference, live_uid));
            reference.uid = live_uid.to_string();
            outcome.changed = true;
        }
    }

    if outcome.changed {
        object.set_owner_references(refs);
        documents.write(path, &object).await?;
    }

    Ok(outcome)
}
