//! Shared test utilities for the updater crate.
//!
//! Gated behind `cfg(test)` and the `test-support` cargo feature so
//! integration suites can drive the sync engine without network access.
//! The stub client answers from predefined responses and records which
//! artifacts were fetched, letting tests assert that a failing sync
//! stopped before any download.

use crate::error::{Result, SyncError};
use crate::release::artifact::ArtifactName;
use crate::release::client::ReleaseClient;
use crate::release::digest::Sha256Digest;
use crate::release::manifest::Manifest;
use crate::release::version::VersionTag;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Hex SHA-256 of a byte slice, for building expected manifest entries.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256Digest::of_bytes(bytes).as_str().to_owned()
}

/// Build a checksum manifest JSON document from digest entries.
#[must_use]
pub fn manifest_json(entries: &[(&str, &str)]) -> String {
    let map: BTreeMap<&str, &str> = entries.iter().copied().collect();
    serde_json::to_string(&map).unwrap_or_default()
}

/// How the stub should answer one remote request.
#[derive(Debug, Clone)]
pub enum RemoteBehaviour<T> {
    /// Answer with the given value.
    Respond(T),
    /// Fail with a transport error.
    NetworkError,
    /// Fail with a missing remote object.
    NotFound,
}

impl<T: Clone> RemoteBehaviour<T> {
    fn resolve(&self, what: &str) -> Result<T> {
        match self {
            Self::Respond(value) => Ok(value.clone()),
            Self::NetworkError => Err(SyncError::Network {
                url: format!("stub://{what}"),
                reason: "connection refused".to_owned(),
            }),
            Self::NotFound => Err(SyncError::NotFound {
                what: format!("remote object at stub://{what}"),
            }),
        }
    }
}

/// A [`ReleaseClient`] answering from predefined responses.
pub struct StubReleaseClient {
    version: RemoteBehaviour<String>,
    manifest_json: RemoteBehaviour<String>,
    artifacts: BTreeMap<String, RemoteBehaviour<Vec<u8>>>,
    fetched: Mutex<Vec<String>>,
}

impl StubReleaseClient {
    /// A stub serving `version` and the given artifact contents, with a
    /// manifest whose digests match those contents.
    #[must_use]
    pub fn serving(version: &str, files: &[(&str, &[u8])]) -> Self {
        let entries: Vec<(String, String)> = files
            .iter()
            .map(|(name, bytes)| ((*name).to_owned(), sha256_hex(bytes)))
            .collect();
        let borrowed: Vec<(&str, &str)> = entries
            .iter()
            .map(|(name, digest)| (name.as_str(), digest.as_str()))
            .collect();
        let artifacts = files
            .iter()
            .map(|(name, bytes)| ((*name).to_owned(), RemoteBehaviour::Respond(bytes.to_vec())))
            .collect();
        Self {
            version: RemoteBehaviour::Respond(version.to_owned()),
            manifest_json: RemoteBehaviour::Respond(manifest_json(&borrowed)),
            artifacts,
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// Replace the version behaviour.
    #[must_use]
    pub fn with_version(mut self, behaviour: RemoteBehaviour<String>) -> Self {
        self.version = behaviour;
        self
    }

    /// Replace the manifest behaviour.
    #[must_use]
    pub fn with_manifest(mut self, behaviour: RemoteBehaviour<String>) -> Self {
        self.manifest_json = behaviour;
        self
    }

    /// Replace one artifact's behaviour.
    #[must_use]
    pub fn with_artifact(mut self, name: &str, behaviour: RemoteBehaviour<Vec<u8>>) -> Self {
        self.artifacts.insert(name.to_owned(), behaviour);
        self
    }

    /// Names of the artifacts fetched so far, in request order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock was poisoned by an earlier panic.
    #[must_use]
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().expect("fetch log lock").clone()
    }
}

impl ReleaseClient for StubReleaseClient {
    fn remote_version(&self) -> Result<VersionTag> {
        let raw = self.version.resolve("release")?;
        VersionTag::parse(&raw)
    }

    fn manifest(&self) -> Result<Manifest> {
        let raw = self.manifest_json.resolve("checksums.json")?;
        Manifest::parse(&raw)
    }

    fn artifact(&self, name: &ArtifactName) -> Result<Vec<u8>> {
        self.fetched
            .lock()
            .expect("fetch log lock")
            .push(name.as_str().to_owned());
        self.artifacts
            .get(name.as_str())
            .ok_or_else(|| SyncError::NotFound {
                what: format!("remote object at stub://{name}"),
            })?
            .resolve(name.as_str())
    }
}
