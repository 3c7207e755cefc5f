//! Tests for single-line stylesheet pretty printing.

#![allow(unused_results)]

use livesheet_css::unminify;
use std::borrow::Cow;

#[test]
fn test_unminify_rules() {
    let out = unminify("a{color:red;background:blue}b{margin:0}");
    assert_eq!(
        out,
        "a {\n\tcolor: red;\n\tbackground: blue\n}\nb {\n\tmargin: 0\n}"
    );
}

#[test]
fn test_unminify_trailing_semicolon() {
    let out = unminify("p{margin:0;}");
    assert_eq!(out, "p {\n\tmargin: 0;\n}");
}

#[test]
fn test_multiline_sheet_is_untouched() {
    let css = "a {\n  color: red;\n}";
    assert!(matches!(unminify(css), Cow::Borrowed(s) if s == css));
}

#[test]
fn test_carriage_return_counts_as_line_break() {
    let css = "a{color:red}\r";
    assert_eq!(unminify(css), css);
}
