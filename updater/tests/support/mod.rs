//! Shared fixtures for the behaviour test suites.

use camino::Utf8PathBuf;
use windlass_updater::backup::BackupStore;
use windlass_updater::engine::SyncReport;
use windlass_updater::error::Result;
use windlass_updater::marker::VersionMarker;
use windlass_updater::release::artifact::ArtifactName;
use windlass_updater::test_utils::StubReleaseClient;

/// Published content of the main word map artifact.
pub const CONTENT_MAP: &[u8] = b"word map payload";

/// Published content of the diff artifact.
pub const CONTENT_DIFF: &[u8] = b"word map diff payload";

/// The published content for a named artifact.
pub fn artifact_content(name: &str) -> Vec<u8> {
    match name {
        "translate_words_map_en" => CONTENT_MAP.to_vec(),
        "translate_words_map_en_diff" => CONTENT_DIFF.to_vec(),
        other => panic!("unknown artifact {other}"),
    }
}

/// Sandbox shared by the install and restore scenarios: a target
/// directory, marker, and backup store rooted in one temp dir, plus the
/// stub release client and the last install result.
pub struct SyncWorld {
    _temp: tempfile::TempDir,
    /// The directory artifacts are installed into.
    pub target: Utf8PathBuf,
    /// Installed-version marker store.
    pub marker: VersionMarker,
    /// Backup snapshot store.
    pub backups: BackupStore,
    /// Stubbed remote release.
    pub client: Option<StubReleaseClient>,
    /// Outcome of the last install.
    pub result: Option<Result<SyncReport>>,
}

impl SyncWorld {
    /// Create a fresh sandbox with an existing, empty target directory.
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 path");
        let target = root.join("locale");
        std::fs::create_dir_all(&target).expect("create target");
        Self {
            _temp: temp,
            target,
            marker: VersionMarker::new(root.join("installed_version.txt")),
            backups: BackupStore::new(root.join("backup")),
            client: None,
            result: None,
        }
    }

    /// The artifact set under management.
    pub fn artifacts(&self) -> Vec<ArtifactName> {
        ["translate_words_map_en", "translate_words_map_en_diff"]
            .iter()
            .map(|name| ArtifactName::try_from(*name).expect("valid name"))
            .collect()
    }
}

impl Default for SyncWorld {
    fn default() -> Self {
        Self::new()
    }
}
