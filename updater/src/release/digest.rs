//! SHA-256 digest newtype and content hashing.
//!
//! The digest is the sole authenticity check for downloaded artifacts, so
//! the full cryptographic hash is kept and compared. Values normalize to
//! lowercase at construction, making comparison case-insensitive while
//! the wire format stays lowercase hex. Comparison is plain equality:
//! this is an integrity check, not a secret comparison, so constant-time
//! behaviour is not required.

use crate::error::{Result, SyncError};
use sha2::{Digest, Sha256};
use std::fmt;

/// Expected length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// A validated, lowercase hex-encoded SHA-256 digest.
///
/// # Examples
///
/// ```
/// use windlass_updater::release::digest::Sha256Digest;
///
/// let digest = Sha256Digest::try_from("A".repeat(64)).unwrap();
/// assert_eq!(digest.as_str(), "a".repeat(64));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Compute the digest of a byte slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use windlass_updater::release::digest::Sha256Digest;
    ///
    /// let digest = Sha256Digest::of_bytes(b"hello world");
    /// assert_eq!(digest.as_str().len(), 64);
    /// ```
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        // sha2 always yields 64 lowercase hex characters.
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Return true iff `bytes` hash to this digest.
    #[must_use]
    pub fn matches(&self, bytes: &[u8]) -> bool {
        Self::of_bytes(bytes) == *self
    }

    /// Return the digest as a lowercase hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Sha256Digest {
    type Error = SyncError;

    fn try_from(value: &str) -> Result<Self> {
        validate_hex(value)?;
        Ok(Self(value.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for Sha256Digest {
    type Error = SyncError;

    fn try_from(value: String) -> Result<Self> {
        validate_hex(&value)?;
        Ok(Self(value.to_ascii_lowercase()))
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is 64 hex characters, any case.
fn validate_hex(value: &str) -> Result<()> {
    if value.len() != DIGEST_HEX_LEN {
        return Err(SyncError::InvalidDigest {
            reason: format!(
                "expected {DIGEST_HEX_LEN} hex characters, got {}",
                value.len()
            ),
        });
    }
    if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(SyncError::InvalidDigest {
            reason: format!("non-hex character '{bad}'"),
        });
    }
    Ok(())
}
