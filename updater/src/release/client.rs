//! Remote release access: version discovery, manifest, and artifact bytes.
//!
//! Provides a trait-based abstraction over the published release so the
//! sync engine can be exercised without network access. The production
//! implementation talks to the GitHub releases API for the latest tag and
//! to the raw content host for the manifest and artifact bytes. This
//! layer performs zero retries; retry policy belongs to callers.

use crate::error::{Result, SyncError};
use crate::release::artifact::ArtifactName;
use crate::release::manifest::Manifest;
use crate::release::version::VersionTag;
use serde::Deserialize;
use std::io::Read;
use std::time::Duration;

/// Name of the checksum manifest object in the remote file store.
const MANIFEST_OBJECT: &str = "checksums.json";

/// Access to the remote release: latest tag, checksum manifest, and raw
/// artifact content.
///
/// The abstraction allows tests to substitute stub responses without
/// network access.
#[cfg_attr(test, mockall::automock)]
pub trait ReleaseClient {
    /// Fetch the latest published version tag.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Network`] on transport failure, timeout, or a
    /// non-success status, and [`SyncError::Parse`] when the release
    /// document lacks a usable tag.
    fn remote_version(&self) -> Result<VersionTag>;

    /// Fetch and parse the checksum manifest.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Network`] on transport failure and
    /// [`SyncError::ManifestFormat`] for a malformed or empty document.
    fn manifest(&self) -> Result<Manifest>;

    /// Download the raw bytes of one artifact.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Network`] on transport failure and
    /// [`SyncError::NotFound`] when the remote object does not exist.
    fn artifact(&self, name: &ArtifactName) -> Result<Vec<u8>>;
}

/// URL layout of a published release.
///
/// # Examples
///
/// ```
/// use windlass_updater::release::client::ReleaseEndpoints;
///
/// let endpoints = ReleaseEndpoints::for_repository("windlass-project/locale-pack");
/// assert!(endpoints.release_url().contains("windlass-project/locale-pack"));
/// assert!(endpoints.manifest_url().ends_with("checksums.json"));
/// ```
#[derive(Debug, Clone)]
pub struct ReleaseEndpoints {
    release_api: String,
    files_base: String,
}

impl ReleaseEndpoints {
    /// Derive endpoint URLs from a GitHub `owner/name` repository slug.
    #[must_use]
    pub fn for_repository(slug: &str) -> Self {
        Self {
            release_api: format!("https://api.github.com/repos/{slug}/releases/latest"),
            files_base: format!("https://raw.githubusercontent.com/{slug}/main/files/"),
        }
    }

    /// The latest-release metadata URL.
    #[must_use]
    pub fn release_url(&self) -> &str {
        &self.release_api
    }

    /// The checksum manifest URL.
    #[must_use]
    pub fn manifest_url(&self) -> String {
        format!("{}{MANIFEST_OBJECT}", self.files_base)
    }

    /// The raw content URL for one artifact.
    #[must_use]
    pub fn artifact_url(&self, name: &ArtifactName) -> String {
        format!("{}{name}", self.files_base)
    }
}

/// The release metadata document, reduced to the field this tool reads.
#[derive(Debug, Deserialize)]
struct ReleaseDoc {
    tag_name: String,
}

/// HTTP-backed [`ReleaseClient`] using `ureq`.
pub struct HttpReleaseClient {
    endpoints: ReleaseEndpoints,
    agent: ureq::Agent,
}

impl HttpReleaseClient {
    /// Build a client for the given endpoints with a per-call timeout.
    #[must_use]
    pub fn new(endpoints: ReleaseEndpoints, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            endpoints,
            agent: ureq::Agent::new_with_config(config),
        }
    }

    /// Download a URL and return the body as a string.
    fn fetch_text(&self, url: &str) -> Result<String> {
        log::debug!("GET {url}");
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        response
            .into_body()
            .read_to_string()
            .map_err(|e| SyncError::Network {
                url: url.to_owned(),
                reason: e.to_string(),
            })
    }

    /// Download a URL and return the body as raw bytes.
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("GET {url}");
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let mut bytes = Vec::new();
        response
            .into_body()
            .as_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| SyncError::Network {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(bytes)
    }
}

impl ReleaseClient for HttpReleaseClient {
    fn remote_version(&self) -> Result<VersionTag> {
        let body = self.fetch_text(self.endpoints.release_url())?;
        let doc: ReleaseDoc = serde_json::from_str(&body).map_err(|e| SyncError::Parse {
            reason: format!("release document: {e}"),
        })?;
        VersionTag::parse(&doc.tag_name)
    }

    fn manifest(&self) -> Result<Manifest> {
        let body = self.fetch_text(&self.endpoints.manifest_url())?;
        Manifest::parse(&body)
    }

    fn artifact(&self, name: &ArtifactName) -> Result<Vec<u8>> {
        self.fetch_bytes(&self.endpoints.artifact_url(name))
    }
}

/// Map a ureq error to the sync error taxonomy.
fn map_ureq_error(url: &str, err: &ureq::Error) -> SyncError {
    match err {
        ureq::Error::StatusCode(404) => SyncError::NotFound {
            what: format!("remote object at {url}"),
        },
        other => SyncError::Network {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> ArtifactName {
        ArtifactName::try_from(value).expect("valid name")
    }

    #[test]
    fn endpoints_derive_from_slug() {
        let endpoints = ReleaseEndpoints::for_repository("owner/pack");
        assert_eq!(
            endpoints.release_url(),
            "https://api.github.com/repos/owner/pack/releases/latest"
        );
        assert_eq!(
            endpoints.manifest_url(),
            "https://raw.githubusercontent.com/owner/pack/main/files/checksums.json"
        );
        assert_eq!(
            endpoints.artifact_url(&name("translate_words_map_en")),
            "https://raw.githubusercontent.com/owner/pack/main/files/translate_words_map_en"
        );
    }

    #[test]
    fn map_ureq_error_maps_404_to_not_found() {
        let err = ureq::Error::StatusCode(404);
        let mapped = map_ureq_error("https://example.test/file", &err);
        assert!(matches!(mapped, SyncError::NotFound { .. }));
    }

    #[test]
    fn map_ureq_error_maps_other_status_to_network() {
        let err = ureq::Error::StatusCode(500);
        let mapped = map_ureq_error("https://example.test/file", &err);
        assert!(matches!(mapped, SyncError::Network { .. }));
    }

    #[test]
    fn release_doc_requires_tag_field() {
        let result: std::result::Result<ReleaseDoc, _> = serde_json::from_str(r#"{"name":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn mock_client_satisfies_trait() {
        let mut mock = MockReleaseClient::new();
        mock.expect_remote_version()
            .returning(|| VersionTag::parse("1.0.0"));
        let version = mock.remote_version().expect("stubbed version");
        assert_eq!(version.to_string(), "1.0.0");
    }
}
