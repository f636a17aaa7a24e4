//! Error types for the Windlass updater.
//!
//! One taxonomy covers the whole sync pipeline: transport failures,
//! malformed remote documents, missing remote objects or backups, digest
//! mismatches, and local filesystem failures. Every engine-level failure
//! aborts the current operation and carries enough context to identify
//! the failing artifact or step.

use crate::release::artifact::ArtifactName;
use crate::release::digest::Sha256Digest;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur during a sync, restore, or check operation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An HTTP request failed: transport error, timeout, or non-success
    /// status.
    #[error("request failed for {url}: {reason}")]
    Network {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// A remote document was retrieved but its expected content was
    /// missing or malformed (e.g. the release tag field).
    #[error("remote document parse failed: {reason}")]
    Parse {
        /// Description of what could not be parsed.
        reason: String,
    },

    /// The checksum manifest document is malformed or empty.
    #[error("malformed checksum manifest: {reason}")]
    ManifestFormat {
        /// Description of the format violation.
        reason: String,
    },

    /// The checksum manifest has no entry for an artifact the engine
    /// intends to install. Detected before any download starts.
    #[error("checksum manifest has no entry for artifact {artifact}")]
    ManifestIncomplete {
        /// The artifact missing from the manifest.
        artifact: ArtifactName,
    },

    /// A remote object or a backup snapshot does not exist.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing object.
        what: String,
    },

    /// A downloaded artifact's digest does not match the manifest entry.
    /// Treated as a security-relevant event: never retried automatically;
    /// a fresh full attempt (manifest and artifact re-fetch) is required.
    #[error("integrity check failed for {artifact}: manifest={expected}, actual={actual}")]
    Integrity {
        /// The artifact whose content failed verification.
        artifact: ArtifactName,
        /// The digest the manifest promised.
        expected: Sha256Digest,
        /// The digest computed from the downloaded bytes.
        actual: Sha256Digest,
    },

    /// A local filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The operation was cancelled between artifact steps.
    #[error("sync cancelled")]
    Cancelled,

    /// An artifact name is empty or contains path components.
    #[error("invalid artifact name \"{value}\": {reason}")]
    InvalidArtifactName {
        /// The rejected name.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A digest string is not a 64-character hex value.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidDigest {
        /// Description of the validation failure.
        reason: String,
    },

    /// A version tag could not be parsed into an orderable version.
    #[error("invalid version tag \"{value}\": {reason}")]
    InvalidVersion {
        /// The rejected tag string.
        value: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// The target directory exists but cannot be written to.
    #[error("target directory {path} is not writable: {reason}")]
    TargetNotWritable {
        /// Path to the non-writable directory.
        path: Utf8PathBuf,
        /// Description of the underlying I/O error.
        reason: String,
    },

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration at {path}: {reason}")]
    Config {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// Description of the parse or read failure.
        reason: String,
    },
}

/// Result type alias using [`SyncError`].
pub type Result<T> = std::result::Result<T, SyncError>;
