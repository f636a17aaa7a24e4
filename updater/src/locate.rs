//! Target directory resolution for the game's locale files.
//!
//! The sync engine takes a plain path and never parses installer
//! metadata itself; this module is the collaborator that produces that
//! path. `SteamLocator` scans Steam's `libraryfolders.vdf` for library
//! paths and probes each library for the game's locale directory,
//! falling back across the configured Steam roots.

use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Supplies the validated target directory for a sync.
pub trait LocationResolver {
    /// Resolve the locale directory to synchronize into.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotFound`] when no installation can be
    /// located.
    fn resolve(&self) -> Result<Utf8PathBuf>;
}

/// Locates the game through Steam's library metadata.
#[derive(Debug, Clone)]
pub struct SteamLocator {
    steam_roots: Vec<Utf8PathBuf>,
    game_dir_name: String,
    locale_subpath: Utf8PathBuf,
}

impl SteamLocator {
    /// Build a locator from configuration.
    #[must_use]
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            steam_roots: config.steam_roots.iter().map(Utf8PathBuf::from).collect(),
            game_dir_name: config.game_dir_name.clone(),
            locale_subpath: Utf8PathBuf::from(&config.locale_subpath),
        }
    }

    /// The locale directory inside one Steam library, if present.
    fn probe_library(&self, library: &Utf8Path) -> Option<Utf8PathBuf> {
        let candidate = library
            .join("steamapps")
            .join("common")
            .join(&self.game_dir_name)
            .join(&self.locale_subpath);
        candidate.is_dir().then_some(candidate)
    }
}

impl LocationResolver for SteamLocator {
    fn resolve(&self) -> Result<Utf8PathBuf> {
        for root in &self.steam_roots {
            // The root is itself a library; libraryfolders.vdf lists the
            // extra ones.
            if let Some(found) = self.probe_library(root) {
                return Ok(found);
            }
            let vdf = root.join("steamapps").join("libraryfolders.vdf");
            let Ok(text) = fs::read_to_string(&vdf) else {
                continue;
            };
            for library in library_paths(&text) {
                if let Some(found) = self.probe_library(Utf8Path::new(&library)) {
                    return Ok(found);
                }
            }
        }
        Err(SyncError::NotFound {
            what: format!(
                "locale directory for \"{}\" in any Steam library",
                self.game_dir_name
            ),
        })
    }
}

/// Extract library paths from `libraryfolders.vdf` text.
///
/// The format is Valve's KeyValues; the tool only needs the quoted value
/// of each `"path"` key, so a line scan is enough.
#[must_use]
pub fn library_paths(vdf: &str) -> Vec<String> {
    let mut paths = Vec::new();
    for line in vdf.lines() {
        if !line.contains("\"path\"") {
            continue;
        }
        if let Some(value) = line.rsplit('"').nth(1) {
            if value != "path" && !value.is_empty() {
                paths.push(value.replace("\\\\", "\\"));
            }
        }
    }
    paths
}

/// The locale directory under an explicitly given game root.
#[must_use]
pub fn locale_dir(game_root: &Utf8Path, config: &SyncConfig) -> Utf8PathBuf {
    game_root.join(&config.locale_subpath)
}

/// Verify that the target directory exists and can be written to.
///
/// Probes by creating and removing a scratch file, the only reliable
/// cross-platform writability check.
///
/// # Errors
///
/// Returns [`SyncError::NotFound`] for a missing directory and
/// [`SyncError::TargetNotWritable`] when the probe write fails.
pub fn ensure_writable(dir: &Utf8Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(SyncError::NotFound {
            what: format!("target directory {dir}"),
        });
    }
    let probe = dir.join(".windlass-write-test");
    match fs::write(&probe, b"test") {
        Ok(()) => {
            let _ = fs::remove_file(&probe);
            Ok(())
        }
        Err(e) => Err(SyncError::TargetNotWritable {
            path: dir.to_owned(),
            reason: e.to_string(),
        }),
    }
}
