//! Timestamped snapshots of the target directory's managed files.
//!
//! Every install attempt begins with a snapshot so the user can always
//! return to a previously installed state. Snapshots live under
//! `backup/<timestamp>/<artifactName>`: one flat directory per snapshot,
//! identified by local time to the second (with a numeric suffix when two
//! snapshots land in the same second). Snapshots are never mutated after
//! creation and never deleted by this tool; retention is the operator's
//! call.

use crate::error::{Result, SyncError};
use crate::release::artifact::ArtifactName;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Identifier of one snapshot: the name of its directory under the
/// backup root.
///
/// # Examples
///
/// ```
/// use windlass_updater::backup::SnapshotId;
///
/// let id = SnapshotId::try_from("2026-02-03_10-15-00").unwrap();
/// assert_eq!(id.as_str(), "2026-02-03_10-15-00");
/// assert!(SnapshotId::try_from("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotId(String);

impl SnapshotId {
    /// Return the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for SnapshotId {
    type Error = SyncError;

    fn try_from(value: &str) -> Result<Self> {
        if value.is_empty()
            || value.contains('/')
            || value.contains('\\')
            || value == "."
            || value == ".."
        {
            return Err(SyncError::NotFound {
                what: format!("backup snapshot \"{value}\""),
            });
        }
        Ok(Self(value.to_owned()))
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a restore: which files came back and which did not.
///
/// Per-file copy failures are collected rather than aborting the whole
/// restore, so the user can see exactly what did and did not get rolled
/// back.
#[derive(Debug, Default)]
pub struct RestoreReport {
    /// Artifacts copied back into the target directory.
    pub restored: Vec<ArtifactName>,
    /// Files that could not be restored, with the failure reason.
    pub failed: Vec<FailedRestore>,
}

impl RestoreReport {
    /// Return true iff every file in the snapshot was restored.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// One file that could not be copied back during a restore.
#[derive(Debug)]
pub struct FailedRestore {
    /// File name inside the snapshot directory.
    pub name: String,
    /// Description of the copy failure.
    pub reason: String,
}

/// Snapshot creation, listing, and restoration under one backup root.
#[derive(Debug, Clone)]
pub struct BackupStore {
    root: Utf8PathBuf,
}

impl BackupStore {
    /// Create a store rooted at the given backup directory.
    #[must_use]
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    /// The backup root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Snapshot whichever of `names` currently exist in `target_dir`.
    ///
    /// Content and modification time are preserved. Artifacts absent from
    /// the target directory are silently skipped, so a first-ever install
    /// produces an empty snapshot. A missing target directory is treated
    /// the same way.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Io`] if the snapshot directory cannot be
    /// created or any existing artifact cannot be copied. Callers abort
    /// the sync on failure, before any target file is touched.
    pub fn snapshot(&self, target_dir: &Utf8Path, names: &[ArtifactName]) -> Result<SnapshotId> {
        fs::create_dir_all(&self.root)?;
        let base = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
        let (id, dir) = self.claim_snapshot_dir(&base)?;

        for name in names {
            let src = target_dir.join(name.as_str());
            if src.is_file() {
                copy_with_mtime(&src, &dir.join(name.as_str()))?;
            }
        }

        log::info!("backup created: {dir}");
        Ok(id)
    }

    /// Copy every file in the snapshot back into `target_dir`,
    /// overwriting current content.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotFound`] for an unknown snapshot id and
    /// [`SyncError::Io`] when the snapshot directory cannot be read.
    /// Per-file copy failures do not abort the restore; they are listed
    /// in the returned [`RestoreReport`].
    pub fn restore(&self, id: &SnapshotId, target_dir: &Utf8Path) -> Result<RestoreReport> {
        let dir = self.root.join(id.as_str());
        if !dir.is_dir() {
            return Err(SyncError::NotFound {
                what: format!("backup snapshot {id}"),
            });
        }

        let mut names: Vec<String> = Vec::new();
        for entry in dir.read_dir_utf8()? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_owned());
            }
        }
        names.sort();

        let mut report = RestoreReport::default();
        for file_name in names {
            let outcome = ArtifactName::try_from(file_name.as_str())
                .map_err(|e| e.to_string())
                .and_then(|artifact| {
                    copy_with_mtime(&dir.join(&file_name), &target_dir.join(&file_name))
                        .map(|()| artifact)
                        .map_err(|e| e.to_string())
                });
            match outcome {
                Ok(artifact) => report.restored.push(artifact),
                Err(reason) => report.failed.push(FailedRestore {
                    name: file_name,
                    reason,
                }),
            }
        }

        log::info!(
            "restored snapshot {id}: {} file(s), {} failure(s)",
            report.restored.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// List snapshot ids, oldest first.
    ///
    /// The timestamp-derived naming makes lexical order chronological.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Io`] if the backup root exists but cannot be
    /// read. A missing root yields an empty list.
    pub fn snapshots(&self) -> Result<Vec<SnapshotId>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in self.root.read_dir_utf8()? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                ids.push(SnapshotId(entry.file_name().to_owned()));
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// The most recent snapshot id, if any snapshot exists.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Io`] if the backup root cannot be read.
    pub fn latest(&self) -> Result<Option<SnapshotId>> {
        Ok(self.snapshots()?.pop())
    }

    /// Claim a fresh snapshot directory for `base`, appending `-2`, `-3`,
    /// … when the base id is already taken.
    fn claim_snapshot_dir(&self, base: &str) -> Result<(SnapshotId, Utf8PathBuf)> {
        let mut attempt: u32 = 1;
        loop {
            let candidate = if attempt == 1 {
                base.to_owned()
            } else {
                format!("{base}-{attempt}")
            };
            let dir = self.root.join(&candidate);
            match fs::create_dir(&dir) {
                Ok(()) => return Ok((SnapshotId(candidate), dir)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Copy a file, carrying the source's modification time to the copy.
fn copy_with_mtime(src: &Utf8Path, dest: &Utf8Path) -> std::io::Result<()> {
    let modified = fs::metadata(src)?.modified()?;
    fs::copy(src, dest)?;
    let file = fs::OpenOptions::new().write(true).open(dest)?;
    file.set_modified(modified)
}

#[cfg(test)]
#[path = "backup_tests.rs"]
mod tests;
