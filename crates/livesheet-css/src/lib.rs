//! Stylesheet discovery and text rewriting for the live stylesheet editor.
//!
//! # Scope
//!
//! This crate implements:
//! - **Source discovery** ([§ 4.2.4 The link element](https://html.spec.whatwg.org/multipage/semantics.html#the-link-element),
//!   [§ 4.2.6 The style element](https://html.spec.whatwg.org/multipage/semantics.html#the-style-element))
//!   - `<link rel="stylesheet">` and `<style>` elements in document order
//!
//! - **Reference rewriting** ([CSS Values § 4.5 Resource Locators](https://www.w3.org/TR/css-values-4/#urls))
//!   - `@import "x";` normalized to `@import url("x");`
//!   - relative `url()` references anchored to the sheet's own location
//!
//! - **Unminify** (best effort pretty printing of single-line sheets)
//!
//! # Not Implemented
//!
//! - CSS parsing. Every transformation here is a bounded textual rewrite;
//!   text the patterns do not recognize passes through unchanged.

/// Reference rewriting for detached stylesheets.
pub mod rewrite;
/// Stylesheet source discovery in a DOM tree.
pub mod sources;
/// Pretty printing of minified stylesheets.
pub mod unminify;

pub use rewrite::{normalize_imports, rewrite};
pub use sources::{StylesheetSource, SourceKind, collect_stylesheet_sources, is_stylesheet_link};
pub use unminify::unminify;
