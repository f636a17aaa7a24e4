//! User-facing output formatting for the updater CLI.
//!
//! All user output goes to an injected writer so tests can capture it.
//! Rendering lives here; the engine and stores only return data.

use crate::backup::{RestoreReport, SnapshotId};
use crate::engine::{ProgressObserver, SyncPhase, SyncReport, UpdateCheck};
use std::io::Write;

/// Write one line to the given stream, ignoring write failures (a closed
/// stderr must not fail the sync itself).
pub fn write_stderr_line(stderr: &mut dyn Write, line: impl AsRef<str>) {
    let _ = writeln!(stderr, "{}", line.as_ref());
}

/// A [`ProgressObserver`] that renders percent lines to a stream.
pub struct StderrProgress<'w> {
    stderr: &'w mut dyn Write,
    quiet: bool,
}

impl<'w> StderrProgress<'w> {
    /// Create a progress renderer; `quiet` suppresses all output.
    pub fn new(stderr: &'w mut dyn Write, quiet: bool) -> Self {
        Self { stderr, quiet }
    }
}

impl ProgressObserver for StderrProgress<'_> {
    fn on_progress(&mut self, percent: u8, phase: SyncPhase) {
        if !self.quiet {
            write_stderr_line(self.stderr, format!("  [{percent:>3}%] {phase}"));
        }
    }
}

/// Describe the result of an update check.
#[must_use]
pub fn render_update_check(check: &UpdateCheck) -> String {
    let installed = if check.installed.is_lowest() {
        "none".to_owned()
    } else {
        check.installed.to_string()
    };
    if check.update_available() {
        format!(
            "Update available: installed {installed}, latest {}",
            check.remote
        )
    } else {
        format!("Up to date: installed {installed}, latest {}", check.remote)
    }
}

/// Describe a successful install.
#[must_use]
pub fn render_sync_report(report: &SyncReport) -> String {
    format!(
        "Installed version {} ({} file(s)). Backup snapshot: {}",
        report.version,
        report.artifacts.len(),
        report.snapshot
    )
}

/// Describe the outcome of a restore, file by file.
#[must_use]
pub fn render_restore_report(id: &SnapshotId, report: &RestoreReport) -> String {
    let mut lines = Vec::new();
    if report.is_complete() {
        lines.push(format!(
            "Restored snapshot {id}: {} file(s)",
            report.restored.len()
        ));
    } else {
        lines.push(format!(
            "Partially restored snapshot {id}: {} restored, {} failed",
            report.restored.len(),
            report.failed.len()
        ));
    }
    for artifact in &report.restored {
        lines.push(format!("  restored {artifact}"));
    }
    for failure in &report.failed {
        lines.push(format!("  FAILED {}: {}", failure.name, failure.reason));
    }
    lines.join("\n")
}
