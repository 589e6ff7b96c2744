//! File name filtering for the watched folder.

use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{Error, Result};

/// Glob-style filter applied to the file name of each created file.
///
/// Only the final path component is matched, so `*.ustx` never matches a
/// directory name. Case-insensitive filters also accept `Song.USTX`.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    pattern: String,
    matcher: GlobMatcher,
}

impl ExtensionFilter {
    /// Compile a filter from a pattern such as `*.ustx`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPattern`] if the pattern is not a valid glob
    /// or contains a path separator.
    pub fn new(pattern: &str, case_sensitive: bool) -> Result<Self> {
        if pattern.contains(['/', '\\']) {
            return Err(Error::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "pattern must not contain a path separator".to_string(),
            });
        }

        let glob = GlobBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .literal_separator(true)
            .build()
            .map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.kind().to_string(),
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    /// The pattern this filter was built from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the file name of `path` matches the pattern.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.matcher.is_match(Path::new(name)))
    }
}
