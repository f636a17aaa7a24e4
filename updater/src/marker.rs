//! Installed-version marker persistence.
//!
//! A single text file records which release is currently on disk. Reading
//! never fails: an absent marker is the valid "nothing installed yet"
//! state and yields the sentinel lowest version, as does unreadable or
//! unparseable content (logged, since that indicates outside
//! interference). The marker is written only after a sync attempt has
//! verified and written every artifact, and the write goes through a
//! temporary file plus rename so the marker is never half-updated.

use crate::error::Result;
use crate::release::version::VersionTag;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Store for the persisted installed-version tag.
#[derive(Debug, Clone)]
pub struct VersionMarker {
    path: Utf8PathBuf,
}

impl VersionMarker {
    /// Create a marker store at the given file path.
    #[must_use]
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }

    /// Path of the marker file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read the installed version, or the lowest sentinel when no valid
    /// marker exists. Absence is a state, not an error.
    #[must_use]
    pub fn installed(&self) -> VersionTag {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return VersionTag::lowest();
        };
        match VersionTag::parse(raw.trim()) {
            Ok(tag) => tag,
            Err(e) => {
                log::warn!("ignoring unreadable version marker at {}: {e}", self.path);
                VersionTag::lowest()
            }
        }
    }

    /// Persist `version` as the installed version.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SyncError::Io`] if the marker file or its
    /// parent directory cannot be written.
    pub fn record(&self, version: &VersionTag) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let staged = self.path.with_extension("tmp");
        fs::write(&staged, format!("{version}\n"))?;
        fs::rename(&staged, &self.path)?;
        log::info!("recorded installed version {version}");
        Ok(())
    }

    /// Remove the marker, returning the store to the "nothing installed"
    /// state. Removing an absent marker is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SyncError::Io`] on filesystem failure
    /// other than the marker not existing.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
