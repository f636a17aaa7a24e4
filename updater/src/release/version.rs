//! Version tag newtype with numeric-component ordering.
//!
//! Release tags follow the GitHub convention of an optional leading `v`
//! and a dotted numeric version. Tags normalize into a full semver
//! version before comparison, so ordering is numeric per component:
//! `1.10.0` is newer than `1.2.0`, which naive lexical string comparison
//! gets wrong. An absent installed version is represented by the
//! [`lowest`](VersionTag::lowest) sentinel `0.0.0`, which orders below
//! every published release.

use crate::error::{Result, SyncError};
use std::fmt;
use std::str::FromStr;

/// An ordered identifier for a published artifact set's revision.
///
/// # Examples
///
/// ```
/// use windlass_updater::release::version::VersionTag;
///
/// let older = VersionTag::parse("1.2.0").unwrap();
/// let newer = VersionTag::parse("v1.10.0").unwrap();
/// assert!(newer > older);
/// assert!(VersionTag::lowest() < older);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTag(semver::Version);

impl VersionTag {
    /// Parse a release tag into an orderable version.
    ///
    /// A leading `v` or `V` is stripped, and missing minor or patch
    /// components are padded with zeroes, so `v1.2` parses as `1.2.0`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidVersion`] if the remainder is not a
    /// dotted numeric version.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let bare = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        if bare.is_empty() {
            return Err(SyncError::InvalidVersion {
                value: value.to_owned(),
                reason: "tag is empty".to_owned(),
            });
        }
        // Pad "1.2" and "1" to full major.minor.patch before parsing.
        let candidates = [bare.to_owned(), format!("{bare}.0"), format!("{bare}.0.0")];
        for candidate in &candidates {
            if let Ok(version) = semver::Version::parse(candidate) {
                return Ok(Self(version));
            }
        }
        Err(SyncError::InvalidVersion {
            value: value.to_owned(),
            reason: "not a dotted numeric version".to_owned(),
        })
    }

    /// The sentinel value representing "no version installed".
    #[must_use]
    pub fn lowest() -> Self {
        Self(semver::Version::new(0, 0, 0))
    }

    /// Return true iff this is the [`lowest`](Self::lowest) sentinel.
    #[must_use]
    pub fn is_lowest(&self) -> bool {
        self.0 == semver::Version::new(0, 0, 0)
    }
}

impl FromStr for VersionTag {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
