//! Updater configuration: remote repository, artifact set, and install
//! layout.
//!
//! Compiled-in defaults cover the published locale pack; an optional TOML
//! file overrides individual fields for forks, mirrors, or tests. Only
//! the fields present in the file are overridden.

use crate::error::{Result, SyncError};
use crate::release::artifact::ArtifactName;
use camino::Utf8Path;
use serde::Deserialize;
use std::time::Duration;

/// GitHub repository publishing the locale pack releases.
const DEFAULT_REPOSITORY: &str = "windlass-project/wwm-locale-pack";

/// The fixed set of files the tool manages.
const DEFAULT_ARTIFACTS: [&str; 2] = ["translate_words_map_en", "translate_words_map_en_diff"];

/// Name of the game's directory under a Steam library.
const DEFAULT_GAME_DIR: &str = "Where Winds Meet";

/// Locale directory relative to the game root.
const DEFAULT_LOCALE_SUBPATH: &str = "Package/HD/oversea/locale";

/// Steam installations probed for library folders.
const DEFAULT_STEAM_ROOTS: [&str; 2] = [
    r"C:\Program Files (x86)\Steam",
    r"C:\Program Files\Steam",
];

/// Per-request network timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Tool configuration with compiled-in defaults and optional TOML
/// overrides.
///
/// # Examples
///
/// ```
/// use windlass_updater::config::SyncConfig;
///
/// let config = SyncConfig::default();
/// assert_eq!(config.artifacts.len(), 2);
/// assert!(config.artifact_names().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// GitHub `owner/name` slug of the publishing repository.
    pub repository: String,
    /// Names of the files to synchronize.
    pub artifacts: Vec<String>,
    /// The game's directory name under `steamapps/common`.
    pub game_dir_name: String,
    /// Locale directory relative to the game root, `/`-separated.
    pub locale_subpath: String,
    /// Steam installation roots probed during auto-discovery.
    pub steam_roots: Vec<String>,
    /// Per-request network timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            repository: DEFAULT_REPOSITORY.to_owned(),
            artifacts: DEFAULT_ARTIFACTS.iter().map(|s| (*s).to_owned()).collect(),
            game_dir_name: DEFAULT_GAME_DIR.to_owned(),
            locale_subpath: DEFAULT_LOCALE_SUBPATH.to_owned(),
            steam_roots: DEFAULT_STEAM_ROOTS.iter().map(|s| (*s).to_owned()).collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SyncConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] when the file cannot be read or
    /// parsed.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| SyncError::Config {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&raw, path)
    }

    /// Parse configuration from TOML text; `origin` names the source in
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] for invalid TOML.
    pub fn from_toml_str(raw: &str, origin: &Utf8Path) -> Result<Self> {
        toml::from_str(raw).map_err(|e| SyncError::Config {
            path: origin.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Validate the configured artifact set into typed names.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidArtifactName`] for an unsafe entry.
    pub fn artifact_names(&self) -> Result<Vec<ArtifactName>> {
        self.artifacts
            .iter()
            .map(|name| ArtifactName::try_from(name.as_str()))
            .collect()
    }

    /// The per-request network timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
