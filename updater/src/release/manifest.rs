//! Checksum manifest: the remote map from artifact name to digest.
//!
//! The manifest is fetched fresh on every sync attempt and is the single
//! source of expected digests for that attempt. Entries are held in a
//! `BTreeMap`, giving the fixed deterministic iteration order the sync
//! engine relies on.

use crate::error::{Result, SyncError};
use crate::release::artifact::ArtifactName;
use crate::release::digest::Sha256Digest;
use std::collections::BTreeMap;

/// A parsed checksum manifest.
///
/// # Examples
///
/// ```
/// use windlass_updater::release::manifest::Manifest;
///
/// let json = format!(r#"{{"translate_words_map_en": "{}"}}"#, "a".repeat(64));
/// let manifest = Manifest::parse(&json).unwrap();
/// assert_eq!(manifest.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    entries: BTreeMap<ArtifactName, Sha256Digest>,
}

impl Manifest {
    /// Parse a JSON object of `name: hex-digest` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::ManifestFormat`] if the document is not a
    /// JSON object of strings, is empty, or contains an invalid artifact
    /// name or digest value.
    pub fn parse(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|e| SyncError::ManifestFormat {
                reason: e.to_string(),
            })?;
        if raw.is_empty() {
            return Err(SyncError::ManifestFormat {
                reason: "manifest contains no entries".to_owned(),
            });
        }
        let mut entries = BTreeMap::new();
        for (name, digest) in raw {
            let name = ArtifactName::try_from(name).map_err(|e| SyncError::ManifestFormat {
                reason: e.to_string(),
            })?;
            let digest = Sha256Digest::try_from(digest).map_err(|e| SyncError::ManifestFormat {
                reason: format!("entry {name}: {e}"),
            })?;
            entries.insert(name, digest);
        }
        Ok(Self { entries })
    }

    /// Look up the expected digest for an artifact.
    #[must_use]
    pub fn digest(&self, name: &ArtifactName) -> Option<&Sha256Digest> {
        self.entries.get(name)
    }

    /// Verify the manifest covers every artifact in `names`.
    ///
    /// Runs before any download so an incomplete manifest fails the sync
    /// while the target directory is still untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::ManifestIncomplete`] naming the first missing
    /// artifact.
    pub fn require_complete(&self, names: &[ArtifactName]) -> Result<()> {
        for name in names {
            if !self.entries.contains_key(name) {
                return Err(SyncError::ManifestIncomplete {
                    artifact: name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Number of entries in the manifest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return true iff the manifest has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in deterministic (name) order.
    pub fn iter(&self) -> impl Iterator<Item = (&ArtifactName, &Sha256Digest)> {
        self.entries.iter()
    }
}
