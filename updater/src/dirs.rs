//! Per-user state directory resolution.
//!
//! The installed-version marker and the backup tree live under a
//! platform-specific local data directory. Resolution sits behind a
//! trait so tests can pin the location without touching the real user
//! profile.

use camino::{Utf8Path, Utf8PathBuf};

/// Directory the updater's state lives under inside the user data dir.
const STATE_DIR_NAME: &str = "windlass";

/// Name of the installed-version marker file.
const MARKER_FILE: &str = "installed_version.txt";

/// Name of the backup tree directory.
const BACKUP_DIR: &str = "backup";

/// Abstraction over platform base directories.
pub trait BaseDirs {
    /// The per-user local data directory, when one can be determined.
    fn data_local_dir(&self) -> Option<Utf8PathBuf>;
}

/// Production [`BaseDirs`] using the operating system's conventions.
#[derive(Debug, Default)]
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn data_local_dir(&self) -> Option<Utf8PathBuf> {
        directories_next::BaseDirs::new()
            .map(|dirs| dirs.data_local_dir().to_path_buf())
            .and_then(|path| Utf8PathBuf::try_from(path).ok())
    }
}

/// The default updater state directory for this user, if resolvable.
#[must_use]
pub fn default_state_dir(dirs: &dyn BaseDirs) -> Option<Utf8PathBuf> {
    dirs.data_local_dir().map(|dir| dir.join(STATE_DIR_NAME))
}

/// Locations of the persisted updater state.
#[derive(Debug, Clone)]
pub struct StatePaths {
    /// The installed-version marker file.
    pub marker: Utf8PathBuf,
    /// The backup tree root.
    pub backups: Utf8PathBuf,
}

impl StatePaths {
    /// Lay out the state files under one state directory.
    #[must_use]
    pub fn under(state_dir: &Utf8Path) -> Self {
        Self {
            marker: state_dir.join(MARKER_FILE),
            backups: state_dir.join(BACKUP_DIR),
        }
    }
}
