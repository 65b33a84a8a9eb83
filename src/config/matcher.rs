//! File pattern matcher for package files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::NlsOptions;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid include pattern '{pattern}': {source}")]
    InvalidIncludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches files against configured glob patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    /// Directory the patterns are relative to
    root: PathBuf,
    /// `includePatterns`
    include_set: GlobSet,
    /// `excludePatterns`
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// Creates a new matcher from options.
    pub fn new(root: PathBuf, options: &NlsOptions) -> Result<Self, MatcherError> {
        let include_set = Self::build_glob_set(&options.include_patterns, |pattern, source| {
            MatcherError::InvalidIncludePattern { pattern, source }
        })?;

        let exclude_set = Self::build_glob_set(&options.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { root, include_set, exclude_set })
    }

    /// Compiles `patterns`, mapping a bad pattern through `make_error`.
    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns true if the path matches `includePatterns` but not `excludePatterns`.
    ///
    /// The path must be absolute and under the root.
    #[must_use]
    pub fn is_match(&self, absolute_path: &Path) -> bool {
        let Some(relative_path) = absolute_path.strip_prefix(&self.root).ok() else {
            return false;
        };

        self.is_match_relative(relative_path)
    }

    /// Returns true if the path matches `includePatterns` but not `excludePatterns`.
    ///
    /// The path must be relative to the root.
    #[must_use]
    pub fn is_match_relative(&self, relative_path: &Path) -> bool {
        self.include_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::path::PathBuf;

    use rstest::rstest;

    use super::*;
    use crate::locale::Locale;

    fn create_options(include: &[&str], exclude: &[&str]) -> NlsOptions {
        NlsOptions {
            include_patterns: include.iter().copied().map(String::from).collect(),
            exclude_patterns: exclude.iter().copied().map(String::from).collect(),
            ..NlsOptions::new(Locale::Fr)
        }
    }

    #[rstest]
    fn is_match_with_default_patterns() {
        let options = NlsOptions::new(Locale::Fr);
        let matcher = FileMatcher::new(PathBuf::from("/pkg"), &options).expect("valid patterns");

        assert!(matcher.is_match(Path::new("/pkg/esm/vs/nls.js")));
        assert!(matcher.is_match(Path::new("/pkg/esm/vs/editor/editor.main.js")));

        assert!(!matcher.is_match(Path::new("/pkg/esm/vs/editor/editor.main.d.ts")));
        assert!(!matcher.is_match(Path::new("/pkg/package.json")));
    }

    #[rstest]
    fn is_match_with_exclude_patterns() {
        let options = create_options(&["**/*.js"], &["min/**", "**/*.worker.js"]);
        let matcher = FileMatcher::new(PathBuf::from("/pkg"), &options).expect("valid patterns");

        assert!(matcher.is_match(Path::new("/pkg/esm/vs/base/common/strings.js")));
        assert!(!matcher.is_match(Path::new("/pkg/min/vs/loader.js")));
        assert!(!matcher.is_match(Path::new("/pkg/esm/vs/editor/editor.worker.js")));
    }

    #[rstest]
    fn is_match_outside_root() {
        let options = NlsOptions::new(Locale::Fr);
        let matcher = FileMatcher::new(PathBuf::from("/pkg"), &options).expect("valid patterns");

        assert!(!matcher.is_match(Path::new("/other/esm/vs/nls.js")));
        assert!(!matcher.is_match(Path::new("/nls.js")));
    }

    #[rstest]
    fn is_match_relative_works() {
        let options = create_options(&["esm/**/*.js"], &[]);
        let matcher = FileMatcher::new(PathBuf::from("/pkg"), &options).expect("valid patterns");

        assert!(matcher.is_match_relative(Path::new("esm/vs/nls.js")));
        assert!(!matcher.is_match_relative(Path::new("dev/vs/nls.js")));
    }

    #[rstest]
    fn new_with_invalid_include_pattern() {
        let options = create_options(&["**/*.{js"], &[]);

        let result = FileMatcher::new(PathBuf::from("/pkg"), &options);

        assert!(matches!(result, Err(MatcherError::InvalidIncludePattern { .. })));
    }

    #[rstest]
    fn new_with_invalid_exclude_pattern() {
        let options = create_options(&["**/*.js"], &["[invalid"]);

        let result = FileMatcher::new(PathBuf::from("/pkg"), &options);

        assert!(matches!(result, Err(MatcherError::InvalidExcludePattern { .. })));
    }

    #[rstest]
    fn root_accessor() {
        let options = NlsOptions::new(Locale::Fr);
        let matcher = FileMatcher::new(PathBuf::from("/pkg"), &options).expect("valid patterns");

        assert_eq!(matcher.root(), Path::new("/pkg"));
    }
}
