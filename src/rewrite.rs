//! Injection of the module path key into `localize(` call sites.
//!
//! Matching is textual: occurrences inside comments or string literals are
//! rewritten too, and the rewrite is not idempotent.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::mapping::LocaleMapping;

/// Lookup-function call token.
pub const CALL_TOKEN: &str = "localize(";

/// `localize(` anywhere, including as the tail of a longer identifier.
#[allow(clippy::expect_used)]
static ANYWHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"localize\(").expect("Invalid call token regex pattern"));

/// `localize(` preceded by an ASCII word boundary (`[A-Za-z0-9_]` only).
#[allow(clippy::expect_used)]
static WORD_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)localize\(").expect("Invalid call token regex pattern")
});

/// How strictly the call token is matched.
///
/// The single-pass adapter matches anywhere; the incremental adapter requires
/// a word boundary before the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallToken {
    Anywhere,
    WordBoundary,
}

impl CallToken {
    /// Compiled pattern for this flavour.
    fn regex(self) -> &'static Regex {
        match self {
            Self::Anywhere => &ANYWHERE,
            Self::WordBoundary => &WORD_BOUNDARY,
        }
    }
}

/// Result of [`rewrite_call_sites`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite<'a> {
    /// Rewritten (or borrowed, untouched) source
    code: Cow<'a, str>,
    /// Text inserted after every matched call token
    inserted: String,
    /// Byte offsets in the original source where `inserted` was placed
    offsets: Vec<usize>,
}

impl<'a> Rewrite<'a> {
    /// Returns the source unchanged.
    #[must_use]
    pub const fn unchanged(source: &'a str) -> Self {
        Self { code: Cow::Borrowed(source), inserted: String::new(), offsets: Vec::new() }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn into_code(self) -> String {
        self.code.into_owned()
    }

    #[must_use]
    pub fn inserted_text(&self) -> &str {
        &self.inserted
    }

    /// Offsets (in the original source) of every insertion, ascending.
    #[must_use]
    pub fn insertion_offsets(&self) -> &[usize] {
        &self.offsets
    }

    #[must_use]
    pub fn is_changed(&self) -> bool {
        !self.offsets.is_empty()
    }
}

/// Inserts `'<path_key>', ` as the first argument of every call token match.
///
/// Nothing happens unless `mapping` has an entry for `path_key`; most modules
/// carry no localizable strings, so that case is not an error.
///
/// # Examples
/// ```
/// use monaco_editor_nls::mapping::LocaleMapping;
/// use monaco_editor_nls::rewrite::{
///     CallToken,
///     rewrite_call_sites,
/// };
///
/// let mapping = LocaleMapping::from_json_str(r#"{"vs/foo": {"bar": "baz"}}"#).unwrap();
/// let rewrite =
///     rewrite_call_sites("localize(data, msg)", "vs/foo", &mapping, CallToken::Anywhere);
/// assert_eq!(rewrite.code(), "localize('vs/foo', data, msg)");
/// ```
#[must_use]
pub fn rewrite_call_sites<'a>(
    source: &'a str,
    path_key: &str,
    mapping: &LocaleMapping,
    token: CallToken,
) -> Rewrite<'a> {
    if !mapping.contains_path(path_key) {
        tracing::trace!(path_key, "No translations for module");
        return Rewrite::unchanged(source);
    }

    let inserted = format!("'{path_key}', ");
    let mut code = String::with_capacity(source.len());
    let mut offsets = Vec::new();
    let mut last = 0;

    for found in token.regex().find_iter(source) {
        code.push_str(source.get(last..found.end()).unwrap_or_default());
        code.push_str(&inserted);
        offsets.push(found.end());
        last = found.end();
    }

    if offsets.is_empty() {
        return Rewrite::unchanged(source);
    }

    code.push_str(source.get(last..).unwrap_or_default());
    tracing::trace!(path_key, calls = offsets.len(), "Rewrote localize calls");

    Rewrite { code: Cow::Owned(code), inserted, offsets }
}
