//! Best-effort reformatting of minified stylesheets.
//!
//! A sheet served on a single line is unreadable in an editor. When a sheet
//! has no line breaks at all it is spaced out and split to one declaration
//! per line. Sheets that already contain a line break are left alone.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Ordered (pattern, replacement) passes.
static PASSES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // space before a closing brace
        (r"([^\s};])(\})", "$1 $2"),
        // newline after a closing brace
        (r"(\})(\S)", "$1\n$2"),
        // space around an opening brace
        (r"(\w)(\{)", "$1 $2"),
        (r"(\{)(\w)", "$1 $2"),
        // space after separators
        (r"([;:,])(\S)", "$1 $2"),
        // one declaration per line
        (r"([;{])[ \t]*(\w)", "$1\n\t$2"),
        (r"([\w;])[ \t]*(\})", "$1\n$2"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("static pattern"), replacement))
    .collect()
});

/// Pretty print `css` if it is a single line, otherwise return it unchanged.
#[must_use]
pub fn unminify(css: &str) -> Cow<'_, str> {
    if css.contains(['\r', '\n']) {
        return Cow::Borrowed(css);
    }

    let mut text = css.to_string();
    for (pattern, replacement) in PASSES.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    Cow::Owned(text)
}
