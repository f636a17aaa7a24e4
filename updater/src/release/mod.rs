//! Remote release domain model and access.
//!
//! Everything the sync engine knows about a published release lives here:
//!
//! - [`artifact`] — validated artifact file names (`ArtifactName`).
//! - [`digest`] — SHA-256 digest newtype and hashing (`Sha256Digest`).
//! - [`version`] — orderable release tags (`VersionTag`).
//! - [`manifest`] — the name → digest checksum manifest (`Manifest`).
//! - [`client`] — the `ReleaseClient` trait and its HTTP implementation.

pub mod artifact;
pub mod client;
pub mod digest;
pub mod manifest;
pub mod version;
