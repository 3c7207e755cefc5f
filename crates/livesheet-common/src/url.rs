//! URL helpers.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! Everything here is textual on purpose: stylesheet references are rewritten
//! with patterns, not parsed, and the helpers must never fail. Inputs they do
//! not understand come back unchanged or as `None`.

use regex::Regex;
use std::sync::LazyLock;

/// `scheme://host` at the start of a URL.
static SCHEME_AND_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^:/]+://[^/]+").expect("static pattern"));

/// Origin of a URL, scheme optional (`//cdn.test` is protocol-relative).
static ORIGIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[^:/]+:)?//[^/]+").expect("static pattern"));

/// A reference that already names its own location.
static ABSOLUTE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[^:/]+:|//)").expect("static pattern"));

/// Strip the leading `scheme://host` from a URL, keeping path and query.
///
/// `https://site.test/assets/app.css?v=2` becomes `/assets/app.css?v=2`.
/// URLs without a scheme and host are returned as-is.
#[must_use]
pub fn strip_scheme_and_host(url: &str) -> &str {
    SCHEME_AND_HOST
        .find(url)
        .map_or(url, |m| &url[m.end()..])
}

/// [§ 4 Origin](https://url.spec.whatwg.org/#origin)
///
/// The `scheme://host[:port]` prefix of a URL, or `//host` for a
/// protocol-relative one. `None` when the URL has no host part.
#[must_use]
pub fn origin(url: &str) -> Option<&str> {
    ORIGIN.find(url).map(|m| m.as_str())
}

/// The URL with its last path segment (after the final `/`) removed.
///
/// `https://site.test/assets/app.css` becomes `https://site.test/assets`.
#[must_use]
pub fn directory(url: &str) -> &str {
    url.rsplit_once('/').map_or(url, |(dir, _)| dir)
}

/// Whether a reference carries its own scheme (`http:`, `data:`, ...) or is
/// protocol-relative (`//host/...`).
#[must_use]
pub fn is_absolute_reference(reference: &str) -> bool {
    ABSOLUTE_REFERENCE.is_match(reference)
}

/// [§ 2.5 URLs](https://html.spec.whatwg.org/multipage/urls-and-fetching.html#resolving-urls)
///
/// Resolve a potentially relative `href` against a base URL.
///
/// STEP 1: "If url is an absolute URL, return url."
///
/// STEP 2: "Otherwise, resolve url relative to base."
///
/// NOTE: simplified resolution. `.` and `..` segments are kept verbatim,
/// which servers resolve on their side.
#[must_use]
pub fn resolve_url(href: &str, base_url: Option<&str>) -> String {
    let href = href.trim();

    // STEP 1: a scheme means the href is already absolute.
    if SCHEME_AND_HOST.is_match(href) || href.starts_with("data:") || href.starts_with("file:") {
        return href.to_string();
    }

    // STEP 2: resolve against base.
    let Some(base) = base_url else {
        return href.to_string();
    };

    if href.starts_with("//") {
        // Protocol-relative: borrow the base's scheme.
        let scheme = base.split_once(':').map_or("https", |(scheme, _)| scheme);
        format!("{scheme}:{href}")
    } else if href.starts_with('/') {
        origin(base).map_or_else(|| href.to_string(), |origin| format!("{origin}{href}"))
    } else {
        format!("{}/{href}", directory(base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scheme_and_host() {
        assert_eq!(
            strip_scheme_and_host("https://site.test/assets/app.css?v=2"),
            "/assets/app.css?v=2"
        );
        assert_eq!(strip_scheme_and_host("assets/app.css"), "assets/app.css");
        assert_eq!(strip_scheme_and_host("https://site.test"), "");
    }

    #[test]
    fn origin_with_and_without_scheme() {
        assert_eq!(
            origin("https://site.test/assets/app.css"),
            Some("https://site.test")
        );
        assert_eq!(origin("//cdn.test/a.css"), Some("//cdn.test"));
        assert_eq!(origin("http://localhost:8080/"), Some("http://localhost:8080"));
        assert_eq!(origin("assets/app.css"), None);
    }

    #[test]
    fn directory_strips_last_segment() {
        assert_eq!(
            directory("https://site.test/assets/app.css"),
            "https://site.test/assets"
        );
        assert_eq!(directory("app.css"), "app.css");
    }

    #[test]
    fn absolute_references() {
        assert!(is_absolute_reference("http://a/b"));
        assert!(is_absolute_reference("data:image/png;base64,AAAA"));
        assert!(is_absolute_reference("//cdn.test/x.png"));
        assert!(!is_absolute_reference("/img/x.png"));
        assert!(!is_absolute_reference("img/x.png"));
    }

    #[test]
    fn resolves_hrefs_against_base() {
        let base = Some("https://site.test/blog/post.html");
        assert_eq!(
            resolve_url("css/site.css", base),
            "https://site.test/blog/css/site.css"
        );
        assert_eq!(
            resolve_url("/css/site.css", base),
            "https://site.test/css/site.css"
        );
        assert_eq!(
            resolve_url("//cdn.test/a.css", base),
            "https://cdn.test/a.css"
        );
        assert_eq!(
            resolve_url("http://other.test/a.css", base),
            "http://other.test/a.css"
        );
        assert_eq!(resolve_url("css/site.css", None), "css/site.css");
    }
}
