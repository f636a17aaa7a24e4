//! The sync engine: install, restore, and update-check orchestration.
//!
//! One install attempt moves through `Checking → BackingUp → Downloading
//! → Verifying → Writing → Finalizing → Done`; any failure aborts the
//! attempt from whatever state it was in. Verified bytes are staged in a
//! temporary directory and only renamed into the target directory once
//! every artifact in the set has verified, so a failed attempt never
//! leaves the target half-written. The installed-version marker is
//! written last, making it change if and only if the full artifact set
//! was written.

use crate::backup::{BackupStore, RestoreReport, SnapshotId};
use crate::error::{Result, SyncError};
use crate::marker::VersionMarker;
use crate::release::artifact::ArtifactName;
use crate::release::client::ReleaseClient;
use crate::release::digest::Sha256Digest;
use crate::release::version::VersionTag;
use camino::Utf8Path;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// The states an install attempt moves through.
///
/// Reported alongside progress so a driver can describe what the engine
/// is doing; the engine itself never exposes a resumable mid-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// No operation in flight.
    Idle,
    /// Resolving the remote version and manifest.
    Checking,
    /// Snapshotting the target directory.
    BackingUp,
    /// Fetching artifact bytes.
    Downloading,
    /// Comparing digests against the manifest.
    Verifying,
    /// Moving verified files into the target directory.
    Writing,
    /// Persisting the new version marker.
    Finalizing,
    /// The attempt completed successfully.
    Done,
    /// The attempt was aborted.
    Failed,
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Checking => "checking",
            Self::BackingUp => "backing up",
            Self::Downloading => "downloading",
            Self::Verifying => "verifying",
            Self::Writing => "writing",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

/// Receiver for progress updates during an install.
///
/// Percentages are monotonically non-decreasing within one attempt and
/// land on 100 only when the attempt finishes. This is a side channel:
/// drivers render it, nothing in the result contract depends on it.
pub trait ProgressObserver {
    /// Called at each checkpoint with the overall percentage and the
    /// phase the engine is in.
    fn on_progress(&mut self, percent: u8, phase: SyncPhase);
}

/// A [`ProgressObserver`] that discards updates.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressObserver for NullProgress {
    fn on_progress(&mut self, _percent: u8, _phase: SyncPhase) {}
}

/// Shared cancellation signal, checked between artifact steps.
///
/// Cancellation fails the attempt with [`SyncError::Cancelled`] before
/// the next step begins; it never interrupts a step midway, and the
/// all-or-nothing write discipline means a cancelled attempt leaves the
/// target directory untouched.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a new, unset flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the in-flight attempt.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Return true iff cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn checkpoint(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(SyncError::Cancelled);
        }
        Ok(())
    }
}

/// Result of comparing the installed version with the remote release.
#[derive(Debug, Clone)]
pub struct UpdateCheck {
    /// The version recorded as installed, or the lowest sentinel.
    pub installed: VersionTag,
    /// The latest published version.
    pub remote: VersionTag,
}

impl UpdateCheck {
    /// Return true iff the remote release is strictly newer.
    #[must_use]
    pub fn update_available(&self) -> bool {
        self.remote > self.installed
    }
}

/// Result of a successful install attempt.
#[derive(Debug)]
pub struct SyncReport {
    /// The version now recorded as installed.
    pub version: VersionTag,
    /// The snapshot taken before any write, for user-initiated rollback.
    pub snapshot: SnapshotId,
    /// The artifacts written, in install order.
    pub artifacts: Vec<ArtifactName>,
}

/// Orchestrates release access, backup, verification, and writes.
///
/// The engine owns the whole lifecycle of one sync attempt and assumes
/// single-invocation use: nothing else mutates the target directory or
/// the version marker while a call is in flight.
pub struct SyncEngine<'c> {
    client: &'c dyn ReleaseClient,
    marker: VersionMarker,
    backups: BackupStore,
    artifacts: Vec<ArtifactName>,
}

impl<'c> SyncEngine<'c> {
    /// Build an engine over a release client, marker store, backup
    /// store, and the fixed artifact set to manage.
    #[must_use]
    pub fn new(
        client: &'c dyn ReleaseClient,
        marker: VersionMarker,
        backups: BackupStore,
        artifacts: Vec<ArtifactName>,
    ) -> Self {
        Self {
            client,
            marker,
            backups,
            artifacts,
        }
    }

    /// The artifact set this engine manages.
    #[must_use]
    pub fn artifacts(&self) -> &[ArtifactName] {
        &self.artifacts
    }

    /// Compare the installed version with the latest remote release.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Network`] or [`SyncError::Parse`] when the
    /// remote version cannot be resolved. Reading the local marker never
    /// fails; absence reads as the lowest sentinel.
    pub fn check(&self) -> Result<UpdateCheck> {
        Ok(UpdateCheck {
            installed: self.marker.installed(),
            remote: self.client.remote_version()?,
        })
    }

    /// Run one full install attempt against `target_dir`.
    ///
    /// See the module docs for the state sequence. On success the
    /// returned report carries the new version, the pre-install snapshot
    /// id, and the artifacts written.
    ///
    /// # Errors
    ///
    /// Any step's failure aborts the attempt with the originating error;
    /// the target directory is only mutated when every artifact has
    /// verified, and the version marker only after every artifact was
    /// written.
    pub fn install(
        &self,
        target_dir: &Utf8Path,
        progress: &mut dyn ProgressObserver,
        cancel: &CancelFlag,
    ) -> Result<SyncReport> {
        log::info!("install started for {target_dir}");
        let mut gate = ProgressGate {
            observer: progress,
            last: 0,
        };

        // Checking: resolve remote state; target untouched on failure.
        let remote = self.client.remote_version()?;
        let manifest = self.client.manifest()?;
        manifest.require_complete(&self.artifacts)?;
        cancel.checkpoint()?;

        // Backing up: abort before any write if the snapshot fails.
        let snapshot = self.backups.snapshot(target_dir, &self.artifacts)?;
        gate.emit(20, SyncPhase::BackingUp);

        // Downloading + Verifying: stage everything before touching the
        // target, in the fixed configured order.
        let staging = staging_dir(target_dir)?;
        let total = self.artifacts.len().max(1);
        let mut staged: Vec<(ArtifactName, std::path::PathBuf)> = Vec::new();
        for (index, name) in self.artifacts.iter().enumerate() {
            cancel.checkpoint()?;
            gate.emit(20 + (60 * index / total) as u8, SyncPhase::Downloading);
            let bytes = self.client.artifact(name)?;
            let expected = manifest
                .digest(name)
                .ok_or_else(|| SyncError::ManifestIncomplete {
                    artifact: name.clone(),
                })?;
            let actual = Sha256Digest::of_bytes(&bytes);
            if actual != *expected {
                log::warn!("integrity failure for {name}");
                return Err(SyncError::Integrity {
                    artifact: name.clone(),
                    expected: expected.clone(),
                    actual,
                });
            }
            let staged_path = staging.path().join(name.as_str());
            fs::write(&staged_path, &bytes)?;
            staged.push((name.clone(), staged_path));
            let percent = 20 + (60 * (index + 1) / total) as u8;
            gate.emit(percent, SyncPhase::Verifying);
        }

        // Writing: every artifact verified; move the set into place.
        cancel.checkpoint()?;
        gate.emit(80, SyncPhase::Writing);
        for (name, staged_path) in &staged {
            promote(staged_path, &target_dir.join(name.as_str()))?;
        }

        // Finalizing: the marker changes only now, after the full set.
        gate.emit(90, SyncPhase::Finalizing);
        self.marker.record(&remote)?;
        gate.emit(100, SyncPhase::Done);
        log::info!("install finished at version {remote}");

        Ok(SyncReport {
            version: remote,
            snapshot,
            artifacts: staged.into_iter().map(|(name, _)| name).collect(),
        })
    }

    /// Copy a snapshot's files back into `target_dir`.
    ///
    /// After a complete restore the installed-version marker is cleared
    /// back to the sentinel: the on-disk content no longer corresponds
    /// to any recorded release, and clearing makes the next update check
    /// truthful. A partial restore leaves the marker alone so the
    /// failure stays visible.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotFound`] for an unknown snapshot id and
    /// [`SyncError::Io`] when the snapshot cannot be read or the marker
    /// cannot be cleared. Per-file copy failures are reported in the
    /// [`RestoreReport`], not raised as errors.
    pub fn restore(&self, id: &SnapshotId, target_dir: &Utf8Path) -> Result<RestoreReport> {
        let report = self.backups.restore(id, target_dir)?;
        if report.is_complete() {
            self.marker.clear()?;
        }
        Ok(report)
    }

    /// The backup store this engine snapshots into.
    #[must_use]
    pub fn backups(&self) -> &BackupStore {
        &self.backups
    }
}

/// Clamps progress so observers only ever see non-decreasing values.
struct ProgressGate<'o> {
    observer: &'o mut dyn ProgressObserver,
    last: u8,
}

impl ProgressGate<'_> {
    fn emit(&mut self, percent: u8, phase: SyncPhase) {
        let clamped = percent.clamp(self.last, 100);
        self.last = clamped;
        self.observer.on_progress(clamped, phase);
    }
}

/// Create the staging directory for verified bytes.
///
/// Staging inside the target directory keeps the final renames on one
/// filesystem. When the target directory does not exist the staging area
/// falls back to the system temp dir and the later promotion degrades to
/// copy-and-remove.
fn staging_dir(target_dir: &Utf8Path) -> std::io::Result<tempfile::TempDir> {
    if target_dir.is_dir() {
        tempfile::Builder::new()
            .prefix(".windlass-staging-")
            .tempdir_in(target_dir.as_std_path())
    } else {
        tempfile::tempdir()
    }
}

/// Move a staged file into its final location, replacing any existing
/// file. Rename requires one filesystem; otherwise copy and remove.
fn promote(staged: &Path, dest: &Utf8Path) -> std::io::Result<()> {
    if fs::rename(staged, dest).is_ok() {
        return Ok(());
    }
    fs::copy(staged, dest)?;
    fs::remove_file(staged)
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
