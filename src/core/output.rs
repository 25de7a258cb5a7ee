//! Public output types for sanitize runs.
//!
//! A run produces one `EntryOutcome` per directory entry plus a
//! `SanitizeSummary` of counts. The CLI turns these into its completion line.

use serde::Serialize;

// ============================================================================
// Per-entry outcomes
// ============================================================================

/// What happened to a single directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Content written back; name left as is.
    Rewritten,
    /// Content written back, then the file was renamed.
    Renamed,
    /// Subdirectory, left untouched.
    SkippedDirectory,
    ReadFailed,
    WriteFailed,
    /// Content was written back but the rename did not happen.
    RenameFailed,
}

impl EntryStatus {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            EntryStatus::ReadFailed | EntryStatus::WriteFailed | EntryStatus::RenameFailed
        )
    }
}

/// Outcome for a single entry in a sanitize run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryOutcome {
    pub name: String,
    pub status: EntryStatus,
    /// Occurrences removed from the content (0 when the read failed).
    pub removed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renamed_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Run report
// ============================================================================

/// Counts across all entries of a run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizeSummary {
    pub total: usize,
    pub directories: usize,
    pub rewritten: usize,
    pub renamed: usize,
    pub failed: usize,
}

/// Full result of a sanitize run over one directory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizeReport {
    pub directory: String,
    pub target: String,
    pub entries: Vec<EntryOutcome>,
    pub summary: SanitizeSummary,
}

impl SanitizeReport {
    pub fn new(directory: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            target: target.into(),
            entries: Vec::new(),
            summary: SanitizeSummary::default(),
        }
    }

    pub fn record_directory(&mut self, name: String) {
        self.summary.directories += 1;
        self.push(name, EntryStatus::SkippedDirectory, 0, None, None);
    }

    pub fn record_read_failed(&mut self, name: String, error: String) {
        self.summary.failed += 1;
        self.push(name, EntryStatus::ReadFailed, 0, None, Some(error));
    }

    pub fn record_write_failed(&mut self, name: String, removed: usize, error: String) {
        self.summary.failed += 1;
        self.push(name, EntryStatus::WriteFailed, removed, None, Some(error));
    }

    pub fn record_rewritten(&mut self, name: String, removed: usize) {
        self.summary.rewritten += 1;
        self.push(name, EntryStatus::Rewritten, removed, None, None);
    }

    pub fn record_renamed(&mut self, name: String, removed: usize, renamed_to: String) {
        self.summary.rewritten += 1;
        self.summary.renamed += 1;
        self.push(name, EntryStatus::Renamed, removed, Some(renamed_to), None);
    }

    pub fn record_rename_failed(&mut self, name: String, removed: usize, error: String) {
        self.summary.rewritten += 1;
        self.summary.failed += 1;
        self.push(name, EntryStatus::RenameFailed, removed, None, Some(error));
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.entries.iter().filter(|e| e.status.is_failure())
    }

    pub fn find(&self, name: &str) -> Option<&EntryOutcome> {
        self.entries.iter().find(|e| e.name == name)
    }

    fn push(
        &mut self,
        name: String,
        status: EntryStatus,
        removed: usize,
        renamed_to: Option<String>,
        error: Option<String>,
    ) {
        self.summary.total += 1;
        self.entries.push(EntryOutcome {
            name,
            status,
            removed,
            renamed_to,
            error,
        });
    }
}
