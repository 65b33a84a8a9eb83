//! Module path normalization.

/// Intermediate directory dropped from module paths before lookup.
const BROWSER_SEGMENT: &str = "/browser/";

/// Converts a matched module path (`vs/...` without the `.js` extension) into
/// the key space of the locale mapping.
///
/// Backslashes become forward slashes and the first `/browser/` segment is
/// collapsed to `/`.
///
/// # Examples
/// ```
/// use monaco_editor_nls::path::normalize_module_path;
///
/// assert_eq!(
///     normalize_module_path(r"vs\editor\contrib\find\browser\findWidget"),
///     "vs/editor/contrib/find/findWidget",
/// );
/// ```
#[must_use]
pub fn normalize_module_path(path: &str) -> String {
    path.replace('\\', "/").replacen(BROWSER_SEGMENT, "/", 1)
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::backslashes(r"a\b\browser\c.js", "a/b/c.js")]
    #[case::unchanged("x/y.js", "x/y.js")]
    #[case::forward_slashes("vs/base/browser/ui/button", "vs/base/ui/button")]
    #[case::mixed_separators(r"vs/editor\browser/widget", "vs/editor/widget")]
    #[case::only_first_segment("vs/browser/x/browser/y", "vs/x/browser/y")]
    #[case::leading_segment_kept("browser/x", "browser/x")]
    #[case::segment_name_only("vs/browserish/x", "vs/browserish/x")]
    #[case::empty("", "")]
    fn normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_that!(normalize_module_path(input), eq(expected));
    }
}
