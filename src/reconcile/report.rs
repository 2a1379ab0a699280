//! Change report
//!
//! Collects one row per corrected or unresolved owner reference and renders
//! them as a single aligned table once the run has finished.

use crate::owners::{ResolveError, ResolveErrorKind};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use std::fmt;
use std::io::{self, Write};
use tabwriter::TabWriter;

/// Table column headers
pub const HEADERS: [&str; 5] = ["File", "Owner Kind", "Owner Name", "UID From", "UID To"];

/// Printed instead of the table when nothing changed
pub const NO_CHANGES: &str = "No changed owner references found";

/// The value an owner reference's UID was (or could not be) changed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UidTarget {
    /// The live owner's UID
    Uid(String),
    /// The owner does not exist in the cluster
    NotFound,
    /// The owner could not be resolved for another reason
    Error,
}

impl UidTarget {
    pub fn from_error(err: &ResolveError) -> Self {
        match err.kind() {
            ResolveErrorKind::NotFound => UidTarget::NotFound,
            ResolveErrorKind::Other | ResolveErrorKind::Fatal => UidTarget::Error,
        }
    }
}

impl fmt::Display for UidTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UidTarget::Uid(uid) => write!(f, "{}", uid),
            UidTarget::NotFound => write!(f, "<NOT FOUND>"),
            UidTarget::Error => write!(f, "<ERROR>"),
        }
    }
}

/// A single reported owner reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// File path relative to the export root
    pub file: String,
    pub owner_kind: String,
    pub owner_name: String,
    pub uid_from: String,
    pub uid_to: UidTarget,
}

impl ReportRow {
    /// Row for a reference whose UID was replaced by the live owner's UID
    pub fn corrected(file: &str, owner: &OwnerReference, new_uid: &str) -> Self {
        Self::new(file, owner, UidTarget::Uid(new_uid.to_string()))
    }

    /// Row for a reference whose owner could not be resolved
    pub fn unresolved(file: &str, owner: &OwnerReference, err: &ResolveError) -> Self {
        Self::new(file, owner, UidTarget::from_error(err))
    }

    fn new(file: &str, owner: &OwnerReference, uid_to: UidTarget) -> Self {
        Self {
            file: file.to_string(),
            owner_kind: owner.kind.clone(),
            owner_name: owner.name.clone(),
            uid_from: owner.uid.clone(),
            uid_to,
        }
    }
}

/// Ordered rows for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeReport {
    rows: Vec<ReportRow>,
}

impl ChangeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    pub fn extend(&mut self, rows: impl IntoIterator<Item = ReportRow>) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the notice or the table to `out`
    pub fn render<W: Write>(&self, mut out: W) -> io::Result<()> {
        if self.rows.is_empty() {
            return writeln!(out, "{}", NO_CHANGES);
        }

        let mut tw = TabWriter::new(out).padding(2);
        writeln!(tw, "{}", HEADERS.join("\t"))?;
        for row in &self.rows {
            writeln!(
                tw,
                "{}\t{}\t{}\t{}\t{}",
                row.file, row.owner_kind, row.owner_name, row.uid_from, row.uid_to
            )?;
        }
        tw.flush()
    }

    /// Render to stdout
    pub fn print(&self) -> io::Result<()> {
        self.render(io::stdout().lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(kind: &str, name: &str, uid: &str) -> OwnerReference {
        OwnerReference {
            api_version: "apps/v1".to_string(),
            kind: kind.to_string(),
            name: name.to_string(),
            uid: uid.to_string(),
            ..Default::default()
        }
    }

    fn render(report: &ChangeReport) -> String {
        let mut buf = Vec::new();
        report.render(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_report_prints_notice() {
        let report = ChangeReport::new();
        assert!(report.is_empty());
        assert_eq!(render(&report), "No changed owner references found\n");
    }

    #[test]
    fn test_render_table() {
        let mut report = ChangeReport::new();
        report.push(ReportRow::corrected(
            "pod.yaml",
            &reference("ReplicaSet", "rs-a", "old-uid"),
            "new-uid",
        ));

        insta::assert_snapshot!(render(&report), @r"
        File      Owner Kind  Owner Name  UID From  UID To
        pod.yaml  ReplicaSet  rs-a        old-uid   new-uid
        ");
    }

    #[test]
    fn test_markers() {
        let owner = reference("ReplicaSet", "rs-a", "old-uid");
        let not_found = ReportRow::unresolved(
            "a.yaml",
            &owner,
            &ResolveError::NotFound {
                kind: "ReplicaSet".to_string(),
                name: "rs-a".to_string(),
                namespace: "ns1".to_string(),
            },
        );
        let failed = ReportRow::unresolved(
            "a.yaml",
            &owner,
            &ResolveError::Fetch {
                kind: "ReplicaSet".to_string(),
                name: "rs-a".to_string(),
                source: "forbidden".into(),
            },
        );

        assert_eq!(not_found.uid_from, "old-uid");
        assert_eq!(not_found.uid_to.to_string(), "<NOT FOUND>");
        assert_eq!(failed.uid_to.to_string(), "<ERROR>");
        assert_ne!(not_found.uid_to, failed.uid_to);

        let mut report = ChangeReport::new();
        report.extend([not_found, failed]);
        let rendered = render(&report);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("File"));
        assert!(lines[1].ends_with("<NOT FOUND>"));
        assert!(lines[2].ends_with("<ERROR>"));
    }

    #[test]
    fn test_rows_keep_insertion_order() {
        let mut report = ChangeReport::new();
        report.push(ReportRow::corrected("b.yaml", &reference("Job", "j", "1"), "2"));
        report.push(ReportRow::corrected("a.yaml", &reference("Job", "j", "1"), "2"));
        let files: Vec<&str> = report.rows().iter().map(|r| r.file.as_str()).collect();
        assert_eq!(files, vec!["b.yaml", "a.yaml"]);
        assert_eq!(report.len(), 2);
    }
}
