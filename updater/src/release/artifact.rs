//! Artifact name newtype for the managed file set.
//!
//! An artifact is one file in the fixed set this tool synchronizes. Names
//! come from configuration and from remote manifest keys, and they are
//! joined onto the target and backup directories, so validation rejects
//! anything that could escape those directories.

use crate::error::{Result, SyncError};
use std::fmt;

/// A validated artifact file name.
///
/// Names are plain file names: non-empty, free of path separators and
/// parent-directory components, and not starting with a dot.
///
/// # Examples
///
/// ```
/// use windlass_updater::release::artifact::ArtifactName;
///
/// let name = ArtifactName::try_from("translate_words_map_en").unwrap();
/// assert_eq!(name.as_str(), "translate_words_map_en");
/// assert!(ArtifactName::try_from("../escape").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactName(String);

impl ArtifactName {
    /// Return the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ArtifactName {
    type Error = SyncError;

    fn try_from(value: &str) -> Result<Self> {
        validate_name(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for ArtifactName {
    type Error = SyncError;

    fn try_from(value: String) -> Result<Self> {
        validate_name(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for ArtifactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is a safe, plain file name.
fn validate_name(value: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(SyncError::InvalidArtifactName {
            value: value.to_owned(),
            reason: reason.to_owned(),
        })
    };
    if value.is_empty() {
        return reject("name is empty");
    }
    if value.contains('/') || value.contains('\\') {
        return reject("name contains a path separator");
    }
    if value == "." || value == ".." {
        return reject("name is a directory reference");
    }
    if value.starts_with('.') {
        return reject("name starts with a dot");
    }
    if value.chars().any(char::is_control) {
        return reject("name contains a control character");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn accepts_plain_file_name() {
        let name = ArtifactName::try_from("translate_words_map_en_diff");
        assert!(name.is_ok());
    }

    #[rstest]
    #[case::empty("")]
    #[case::forward_slash("dir/file")]
    #[case::backslash("dir\\file")]
    #[case::parent("..")]
    #[case::current(".")]
    #[case::hidden(".hidden")]
    #[case::traversal("../escape")]
    fn rejects_unsafe_names(#[case] bad: &str) {
        let result = ArtifactName::try_from(bad);
        assert!(
            matches!(result, Err(SyncError::InvalidArtifactName { .. })),
            "expected InvalidArtifactName for {bad:?}"
        );
    }

    #[test]
    fn rejects_control_characters() {
        let result = ArtifactName::try_from("bad\nname");
        assert!(matches!(result, Err(SyncError::InvalidArtifactName { .. })));
    }

    #[test]
    fn ordering_is_lexical() {
        let a = ArtifactName::try_from("alpha").expect("valid");
        let b = ArtifactName::try_from("beta").expect("valid");
        assert!(a < b);
    }

    #[test]
    fn display_shows_name() {
        let name = ArtifactName::try_from("file_a").expect("valid");
        assert_eq!(format!("{name}"), "file_a");
    }
}
