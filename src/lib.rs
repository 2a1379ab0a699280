//! ownersync library
//!
//! Repairs owner references in a tree of exported Kubernetes manifests.
//! Each exported object's owner references are resolved against the live
//! cluster; UIDs that drifted (because the owner was recreated) are replaced
//! in place and every correction is reported.

pub mod cli;
pub mod cluster;
pub mod config;
pub mod document;
pub mod models;
pub mod owners;
pub mod reconcile;
pub mod update;

// Re-export commonly used types for convenience
pub use document::{DocumentAccessor, ExportedObject, FileDocuments};
pub use owners::{OwnerCache, OwnerResolver, ResolveError, ResolveErrorKind};
pub use reconcile::{ChangeReport, ReportRow, UidTarget};
pub use update::{UpdateError, collect_files, reconcile_files, run};
