//! [CSS Values § 4.5 Resource Locators](https://www.w3.org/TR/css-values-4/#urls)
//!
//! "A URL is a pointer to a resource... relative URLs are resolved to full
//! URLs using a base URL... For CSS style sheets, the base URL is that of the
//! style sheet."
//!
//! Once a linked sheet's text is moved into an inline `<style>`, its base URL
//! silently becomes the document's. [`rewrite`] anchors every relative
//! reference to the sheet's original location so it keeps resolving.

use livesheet_common::url::{directory, is_absolute_reference, origin};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// `@import` followed by a bare quoted string and the rest of the rule.
static IMPORT_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(@import\s+)["']([^"']+)["']([^\n;]*;)"#).expect("static pattern")
});

/// A `url(...)` function and its raw argument.
static URL_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)url\(([^)]+)\)").expect("static pattern"));

/// Rewrite a fetched stylesheet so its references resolve from anywhere.
///
/// # Algorithm
///
/// STEP 1: [`normalize_imports`], so string imports become `url()` functions
///         and go through step 2 like every other reference.
///
/// STEP 2: For each `url(...)`, trim whitespace and one layer of quotes.
///   - absolute (`scheme:` or `//`): left byte-identical.
///   - root-relative (`/path`): `url("<origin of source_url>/path")`, or left
///     unchanged when `source_url` has no origin.
///   - fragment-only (`#id`) or empty: left unchanged, these never point at
///     the sheet's location.
///   - relative (`path`): `url("<directory of source_url>/path")`.
///
/// Rewritten references are always double-quoted. Nothing here can fail;
/// whatever the patterns do not match is passed through.
#[must_use]
pub fn rewrite(css: &str, source_url: &str) -> String {
    let css = normalize_imports(css);
    URL_FUNCTION
        .replace_all(&css, |caps: &Captures<'_>| {
            rewrite_reference(&caps[0], &caps[1], source_url)
        })
        .into_owned()
}

/// [CSS Cascade § 2 Importing Style Sheets](https://www.w3.org/TR/css-cascade-4/#at-import)
///
/// "The @import rule... `@import [ <url> | <string> ] ...`"
///
/// Turn the `<string>` form into the `<url>` form:
/// `@import 'foo.css' screen;` becomes `@import url("foo.css") screen;`.
/// Imports already written with `url()` are left alone.
#[must_use]
pub fn normalize_imports(css: &str) -> Cow<'_, str> {
    IMPORT_STRING.replace_all(css, r#"${1}url("${2}")${3}"#)
}

/// Fragment-only references (`url(#blur)`) name something in the document
/// using the sheet, not a file next to it, so they are never anchored.
fn rewrite_reference(original: &str, argument: &str, source_url: &str) -> String {
    let reference = strip_quotes(argument.trim());

    if reference.is_empty() || reference.starts_with('#') || is_absolute_reference(reference) {
        return original.to_string();
    }

    if reference.starts_with('/') {
        // Hosts may differ between page and sheet, so anchor to the sheet's.
        return origin(source_url).map_or_else(
            || original.to_string(),
            |origin| format!("url(\"{origin}{reference}\")"),
        );
    }

    format!("url(\"{}/{reference}\")", directory(source_url))
}

/// Drop one leading and one trailing quote character.
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}
