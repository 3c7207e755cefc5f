//! [§ 4.2.4 The link element](https://html.spec.whatwg.org/multipage/semantics.html#the-link-element)
//! [§ 4.2.6 The style element](https://html.spec.whatwg.org/multipage/semantics.html#the-style-element)
//!
//! Finding every stylesheet a document applies, in document order.

use livesheet_common::url::resolve_url;
use livesheet_dom::{DomTree, ElementData, NodeId};

/// Where a discovered stylesheet's text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// External stylesheet from `<link rel="stylesheet">`.
    ///
    /// [§ 4.2.4](https://html.spec.whatwg.org/multipage/semantics.html#the-link-element)
    External {
        /// The `href`, resolved against the document base URL when one is known.
        href: String,
        /// The link's `media` attribute, if any.
        media: Option<String>,
    },
    /// Inline stylesheet from a `<style>` element.
    ///
    /// [§ 4.2.6](https://html.spec.whatwg.org/multipage/semantics.html#the-style-element)
    Inline {
        /// The element's `title` attribute, if any.
        title: Option<String>,
    },
}

/// A stylesheet-bearing element found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetSource {
    /// The `<link>` or `<style>` element.
    pub node: NodeId,
    /// What kind of source it is.
    pub kind: SourceKind,
}

/// [§ 6.1 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
///
/// "Declarations from style sheets independently linked by the originating document
/// are treated as if they were concatenated in linking order."
///
/// Collect every `<link rel="stylesheet" href>` and `<style>` element in
/// document order. Link elements without a usable `href` carry no stylesheet
/// and are skipped.
#[must_use]
pub fn collect_stylesheet_sources(tree: &DomTree, base_url: Option<&str>) -> Vec<StylesheetSource> {
    tree.iter_all()
        .filter_map(|node| {
            let data = tree.as_element(node)?;
            source_kind(data, base_url).map(|kind| StylesheetSource { node, kind })
        })
        .collect()
}

fn source_kind(data: &ElementData, base_url: Option<&str>) -> Option<SourceKind> {
    if data.is("link") {
        if !is_stylesheet_link(data) {
            return None;
        }
        // [§ 4.2.4](https://html.spec.whatwg.org/multipage/semantics.html#the-link-element)
        // "The href attribute gives the address (a valid non-empty URL potentially
        // surrounded by spaces) of the linked resource."
        let href = data.attr("href").map(str::trim).filter(|h| !h.is_empty())?;
        Some(SourceKind::External {
            href: resolve_url(href, base_url),
            media: non_empty(data.attr("media")),
        })
    } else if data.is("style") {
        Some(SourceKind::Inline {
            title: non_empty(data.attr("title")),
        })
    } else {
        None
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// [§ 4.2.4 The link element](https://html.spec.whatwg.org/multipage/semantics.html#the-link-element)
///
/// "If the rel attribute's value contains the token stylesheet,
/// then the link is a stylesheet link."
///
/// [§ 2.4.7 Space-separated tokens](https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#space-separated-tokens)
/// Token comparison is ASCII case-insensitive.
#[must_use]
pub fn is_stylesheet_link(data: &ElementData) -> bool {
    data.attr("rel").is_some_and(|rel| {
        rel.split_ascii_whitespace()
            .any(|token| token.eq_ignore_ascii_case("stylesheet"))
    })
}
