//! Owner reference reconciliation
//!
//! Compares each owner reference in an exported file with the live owner
//! and records every correction or unresolved owner in a [`ChangeReport`].

mod engine;
pub mod report;

pub use engine::{FileOutcome, ReconcileError, display_path, reconcile_file};
pub use report::{ChangeReport, ReportRow, UidTarget};
