//! Directory sanitizer: strip a fixed term from file contents and names.
//!
//! Given a `SanitizeSpec` and a directory, this module:
//! 1. Lists the directory's immediate entries once (no recursion)
//! 2. Rewrites every regular file with all occurrences of the term removed
//! 3. Renames files whose names contain the term
//!
//! Per-file failures are reported and skipped. Failing to resolve or list the
//! directory aborts the run before anything is touched.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use regex::bytes::Regex;

use crate::defaults;
use crate::error::{Error, Result};
use crate::local_files::{self, Entry, FileSystem};
use crate::output::SanitizeReport;

// ============================================================================
// Spec
// ============================================================================

/// The term to strip, compiled once for the whole run.
#[derive(Debug, Clone)]
pub struct SanitizeSpec {
    target: String,
    /// `None` for an empty target: content and names are left alone.
    matcher: Option<Regex>,
}

impl SanitizeSpec {
    pub fn new(target: &str) -> Result<Self> {
        let matcher = if target.is_empty() {
            None
        } else {
            let re = Regex::new(&regex::escape(target)).map_err(|e| {
                Error::config_invalid_value("target", Some(target.to_string()), e.to_string())
            })?;
            Some(re)
        };

        Ok(Self {
            target: target.to_string(),
            matcher,
        })
    }

    /// Spec for the build-time target substring.
    pub fn from_defaults() -> Result<Self> {
        Self::new(&defaults::load_defaults().target)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Remove every occurrence of the target from `content`.
    ///
    /// Matches are removed leftmost-first without overlap, and removal repeats
    /// until no occurrence is left, so `DRDRAFTAFT` loses both. Returns the new
    /// content and the number of occurrences removed.
    pub fn strip_content(&self, content: &[u8]) -> (Vec<u8>, usize) {
        let Some(re) = &self.matcher else {
            return (content.to_vec(), 0);
        };

        let mut current = content.to_vec();
        let mut removed = 0;
        // Each pass rescans the whole buffer; nested input costs O(n^2 / len(target)).
        loop {
            let found = re.find_iter(&current).count();
            if found == 0 {
                break;
            }
            removed += found;
            current = re.replace_all(&current, &b""[..]).into_owned();
        }

        (current, removed)
    }

    /// New filename for a rename candidate, or `None` when `name` does not
    /// contain the target (always `None` for an empty target).
    ///
    /// Names are matched as raw bytes with the same rule as content, so names
    /// that aren't valid UTF-8 are still candidates.
    #[cfg(unix)]
    pub fn strip_name(&self, name: &OsStr) -> Option<OsString> {
        use std::os::unix::ffi::OsStrExt;

        let (stripped, removed) = self.strip_content(name.as_bytes());
        (removed > 0).then(|| OsStr::from_bytes(&stripped).to_os_string())
    }

    /// Names that aren't valid UTF-8 are never candidates here.
    #[cfg(not(unix))]
    pub fn strip_name(&self, name: &OsStr) -> Option<OsString> {
        let name = name.to_str()?;
        let (stripped, removed) = self.strip_content(name.as_bytes());
        if removed == 0 {
            return None;
        }
        String::from_utf8(stripped).ok().map(OsString::from)
    }
}

// ============================================================================
// Run
// ============================================================================

/// Sanitize the process's current working directory on the local filesystem.
pub fn sanitize_working_dir(spec: &SanitizeSpec) -> Result<SanitizeReport> {
    let cwd = std::env::current_dir().map_err(|e| Error::workdir_unresolvable(e.to_string()))?;
    sanitize_dir(&local_files::local(), &cwd, spec)
}

/// Sanitize every regular file directly inside `dir`.
///
/// Only a failure to list `dir` is returned as `Err`; per-file failures are
/// printed to stderr and recorded in the report.
pub fn sanitize_dir<F: FileSystem + ?Sized>(
    fs: &F,
    dir: &Path,
    spec: &SanitizeSpec,
) -> Result<SanitizeReport> {
    let entries = fs.list(dir)?;
    let mut report = SanitizeReport::new(dir.display().to_string(), spec.target());

    for entry in &entries {
        process_entry(fs, dir, entry, spec, &mut report);
    }

    Ok(report)
}

fn process_entry<F: FileSystem + ?Sized>(
    fs: &F,
    dir: &Path,
    entry: &Entry,
    spec: &SanitizeSpec,
    report: &mut SanitizeReport,
) {
    let name = entry.name.to_string_lossy().to_string();

    if entry.is_dir {
        log_status!("sanitize", "Skipping directory {}", name);
        report.record_directory(name);
        return;
    }

    let mut record = match fs.read(&entry.path) {
        Ok(record) => record,
        Err(err) => {
            report_failure(&err);
            report.record_read_failed(name, describe(&err));
            return;
        }
    };

    let (cleaned, removed) = spec.strip_content(&record.content);
    record.content = cleaned;

    if let Err(err) = fs.write(&record) {
        report_failure(&err);
        report.record_write_failed(name, removed, describe(&err));
        return;
    }

    let Some(new_name) = spec.strip_name(&entry.name) else {
        log_status!("sanitize", "Rewrote {} ({} removed)", name, removed);
        report.record_rewritten(name, removed);
        return;
    };

    let shown = new_name.to_string_lossy().to_string();
    match rename_entry(fs, dir, entry, &new_name) {
        Ok(()) => {
            log_status!("sanitize", "Renamed {} -> {} ({} removed)", name, shown, removed);
            report.record_renamed(name, removed, shown);
        }
        Err(err) => {
            report_failure(&err);
            report.record_rename_failed(name, removed, describe(&err));
        }
    }
}

fn rename_entry<F: FileSystem + ?Sized>(
    fs: &F,
    dir: &Path,
    entry: &Entry,
    new_name: &OsStr,
) -> Result<()> {
    let to = dir.join(new_name);

    if new_name.is_empty() {
        return Err(Error::file_rename_failed(
            &entry.path,
            &to,
            "stripped filename would be empty",
        ));
    }

    if fs.exists(&to) {
        return Err(Error::file_rename_failed(
            &entry.path,
            &to,
            format!("'{}' already exists", new_name.to_string_lossy()),
        ));
    }

    fs.rename(&entry.path, &to)
}

// ============================================================================
// Reporting
// ============================================================================

/// One-line description of a per-file failure, naming the offending path.
fn describe(err: &Error) -> String {
    let detail = |key: &str| {
        err.details
            .get(key)
            .and_then(serde_json::Value::as_str)
            .unwrap_or("?")
            .to_string()
    };
    let cause = err.cause_text().unwrap_or("unknown error");

    if err.details.get("from").is_some() {
        format!("{} {} -> {}: {}", err.message, detail("from"), detail("to"), cause)
    } else {
        format!("{} {}: {}", err.message, detail("path"), cause)
    }
}

fn report_failure(err: &Error) {
    eprintln!("[sanitize] {}", describe(err));
}
