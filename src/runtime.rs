//! Replacement source for the editor's `vs/nls.js` runtime module.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{
    Captures,
    Regex,
};

use crate::mapping::LocaleMapping;

/// `{n}` placeholder, as matched by the generated `_format`.
#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\d+)\}").expect("Invalid placeholder regex pattern"));

/// Generates the `nls.js` replacement with `mapping` embedded as an object
/// literal.
///
/// The exported `localize(path, data, message, ...args)` resolves
/// `mapping[path][key]` (where `key` is `data.key` for objects, `data`
/// otherwise), falls back to `message`, then substitutes `{n}` placeholders.
pub fn synthesize_runtime_module(mapping: &LocaleMapping) -> Result<String, serde_json::Error> {
    let data = mapping.to_json()?;
    Ok(format!(
        r#"
function _format(message, args) {{
    var result;
    if (args.length === 0) {{
        result = message;
    }} else {{
        result = String(message).replace(/\{{(\d+)\}}/g, function (match, ...rest) {{
            var index = rest[0];
            return typeof args[index] !== 'undefined' ? args[index] : match;
        }});
    }}
    return result;
}}

export function localize(path, data, message, ...args) {{
    const key = typeof data === 'object' ? data.key : data;
    data = {data} || {{}};
    message = (data[path] || {{}})[key] || message;
    return _format(message, args);
}}
"#
    ))
}

/// Replaces `{n}` placeholders with `args[n]`.
///
/// With no arguments the message is returned untouched. A placeholder is kept
/// literally when `n` is not the canonical index of a supplied argument
/// (`{01}` never matches, like a JS property lookup of `"01"`).
#[must_use]
pub fn format_message<S: AsRef<str>>(message: &str, args: &[S]) -> String {
    if args.is_empty() {
        return message.to_string();
    }

    let replaced: Cow<'_, str> = PLACEHOLDER.replace_all(message, |caps: &Captures<'_>| {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        let digits = caps.get(1).map_or("", |m| m.as_str());
        digits
            .parse::<usize>()
            .ok()
            .filter(|index| index.to_string() == digits)
            .and_then(|index| args.get(index))
            .map_or_else(|| whole.to_string(), |arg| arg.as_ref().to_string())
    });
    replaced.into_owned()
}
